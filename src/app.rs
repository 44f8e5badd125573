use std::io;

use crate::batch::{run_daily, run_minute};
use crate::cli::{Cli, Commands, DayArgs, MinuteArgs};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::fetch::{HttpPageSource, PageClient};
use crate::output::{save_lines, write_lines};
use crate::symbols::{load_symbol_file, parse_symbol_list};
use crate::utils::today;

/// Entry point used by `main` once arguments are parsed.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Day(args) => run_day_command(&config, args).await,
        Commands::Minute(args) => run_minute_command(&config, args).await,
    }
}

fn http_client(config: &Config) -> Result<PageClient<HttpPageSource>> {
    let source = HttpPageSource::new(config.source.clone())?;
    Ok(PageClient::new(source, config.source.timeout()).with_max_pages(config.source.max_pages))
}

fn ensure_symbols(symbols: Vec<String>) -> Result<Vec<String>> {
    if symbols.is_empty() {
        return Err(AppError::invalid_input("no symbols given"));
    }
    Ok(symbols)
}

async fn run_day_command(config: &Config, args: DayArgs) -> Result<()> {
    let symbols = match (&args.symbols, &args.file) {
        (Some(list), _) => parse_symbol_list(list),
        (None, Some(path)) => load_symbol_file(path)?,
        (None, None) => Vec::new(),
    };
    let symbols = ensure_symbols(symbols)?;
    let date = args.date.unwrap_or_else(today);
    let concurrency = args.concurrency.unwrap_or(config.day_concurrency);

    let client = http_client(config)?;
    let lines = run_daily(&client, &symbols, date, concurrency).await;

    write_lines(&mut io::stdout(), &lines)?;
    if let Some(path) = &args.output {
        save_lines(path, &lines)?;
        log::info!("Saved {} line(s) to {}", lines.len(), path.display());
    }
    Ok(())
}

/// `-s` names exactly one symbol in minute mode; lists go through `-f`.
fn minute_symbols(args: &MinuteArgs) -> Result<Vec<String>> {
    let symbols = match (&args.symbol, &args.file) {
        (Some(symbol), _) => match symbol.trim() {
            "" => Vec::new(),
            symbol => vec![symbol.to_string()],
        },
        (None, Some(path)) => load_symbol_file(path)?,
        (None, None) => Vec::new(),
    };
    ensure_symbols(symbols)
}

async fn run_minute_command(config: &Config, args: MinuteArgs) -> Result<()> {
    let symbols = minute_symbols(&args)?;
    let date = args.date.unwrap_or_else(today);
    let concurrency = args.concurrency.unwrap_or(config.minute_concurrency);

    let client = http_client(config)?;
    run_minute(&client, &symbols, date, concurrency, &mut io::stdout()).await?;
    Ok(())
}
