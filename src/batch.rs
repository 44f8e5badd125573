//! Run-level orchestration: one limiter, one task per symbol.

use std::io::Write;

use chrono::NaiveDate;
use futures::future::join_all;
use futures::stream::{FuturesUnordered, StreamExt};

use crate::daily::daily_line;
use crate::error::Result;
use crate::fetch::{PageClient, PageSource, RequestLimiter};
use crate::minute::collect_symbol;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub symbols: usize,
    pub with_data: usize,
    pub rows: usize,
}

/// Collect intraday rows for every symbol and stream each symbol's lines to
/// `out` as soon as that symbol finishes.
///
/// All page requests of all symbols share a single limiter of `concurrency`
/// permits; symbols themselves are not throttled.
pub async fn run_minute<S, W>(
    client: &PageClient<S>,
    symbols: &[String],
    date: NaiveDate,
    concurrency: usize,
    out: &mut W,
) -> Result<BatchSummary>
where
    S: PageSource,
    W: Write,
{
    let limiter = RequestLimiter::new(concurrency);
    log::info!(
        "Collecting intraday data for {} symbol(s) on {date} with {} concurrent request(s)",
        symbols.len(),
        limiter.capacity()
    );

    let mut summary = BatchSummary {
        symbols: symbols.len(),
        ..BatchSummary::default()
    };

    let mut pending: FuturesUnordered<_> = symbols
        .iter()
        .map(|symbol| {
            let limiter = &limiter;
            async move { (symbol, collect_symbol(client, limiter, symbol, date).await) }
        })
        .collect();

    while let Some((symbol, rows)) = pending.next().await {
        if rows.is_empty() {
            continue;
        }
        for row in &rows {
            writeln!(out, "{}", row.to_line())?;
        }
        out.flush()?;

        log::debug!("{symbol}: wrote {} row(s)", rows.len());
        summary.with_data += 1;
        summary.rows += rows.len();
    }

    log::info!(
        "Finished: {}/{} symbol(s) returned data, {} row(s)",
        summary.with_data,
        summary.symbols,
        summary.rows
    );
    Ok(summary)
}

/// Fetch the daily bar of every symbol and return the output lines sorted.
pub async fn run_daily<S: PageSource>(
    client: &PageClient<S>,
    symbols: &[String],
    date: NaiveDate,
    concurrency: usize,
) -> Vec<String> {
    let limiter = RequestLimiter::new(concurrency);
    log::info!(
        "Collecting daily bars for {} symbol(s) on {date} with {} concurrent request(s)",
        symbols.len(),
        limiter.capacity()
    );

    let results = join_all(
        symbols
            .iter()
            .map(|symbol| daily_line(client, &limiter, symbol, date)),
    )
    .await;

    let mut lines: Vec<String> = results.into_iter().flatten().collect();
    lines.sort();

    log::info!("Finished: {}/{} symbol(s) returned data", lines.len(), symbols.len());
    lines
}
