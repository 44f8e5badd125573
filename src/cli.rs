use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::utils::parse_date;

#[derive(Parser, Debug)]
#[command(name = "naver-sise")]
#[command(about = "Fetch daily and intraday KRX prices from Naver Finance as TSV")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional JSON file overriding endpoints, timeout and default concurrency
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one OHLCV line per symbol for the given date
    Day(DayArgs),

    /// Print every intraday trade row per symbol for the given date
    Minute(MinuteArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["symbols", "file"])))]
pub struct DayArgs {
    /// Target date, YYYY-MM-DD (default: today)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Comma-separated symbols, e.g. 005930,000660
    #[arg(short, long)]
    pub symbols: Option<String>,

    /// File with one symbol per line
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Maximum concurrent requests (default: 20)
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Also write the sorted lines to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["symbol", "file"])))]
pub struct MinuteArgs {
    /// Target date, YYYY-MM-DD (default: today)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Single symbol
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// File with one symbol per line
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Maximum concurrent requests (default: 50)
    #[arg(short, long)]
    pub concurrency: Option<usize>,
}
