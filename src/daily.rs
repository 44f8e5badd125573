use chrono::NaiveDate;

use crate::fetch::{Endpoint, FetchResult, PageClient, PageQuery, PageSource, RequestLimiter};
use crate::model::DailyRow;
use crate::parse::parse_daily_rows;

/// Look up the bar for `date` on the first page of the daily listing.
///
/// Rows whose opening price is `0` are treated as non-trading days and skipped.
pub async fn fetch_daily<S: PageSource>(
    client: &PageClient<S>,
    limiter: &RequestLimiter,
    symbol: &str,
    date: NaiveDate,
) -> FetchResult<Option<DailyRow>> {
    let text = client
        .fetch_text(limiter, Endpoint::Day, &PageQuery::daily(symbol))
        .await?;
    let target = date.format("%Y-%m-%d").to_string();

    Ok(parse_daily_rows(&text)
        .into_iter()
        .find(|row| row.date == target && row.is_trading_day()))
}

/// Formatted output line for `symbol`, or `None` when nothing usable was found.
pub async fn daily_line<S: PageSource>(
    client: &PageClient<S>,
    limiter: &RequestLimiter,
    symbol: &str,
    date: NaiveDate,
) -> Option<String> {
    match fetch_daily(client, limiter, symbol, date).await {
        Ok(Some(row)) => Some(row.to_line(symbol)),
        Ok(None) => {
            log::debug!("{symbol}: no trading row for {date}");
            None
        }
        Err(err) => {
            log::warn!("{symbol}: daily fetch failed: {err}");
            None
        }
    }
}
