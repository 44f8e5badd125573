//! Intraday collection: read page 1, fan out over the remaining pages, merge.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};

use crate::error::AppError;
use crate::fetch::{PageClient, PageSource, RequestLimiter};
use crate::model::MinuteRow;

/// Outcome of reading the first page of a symbol.
#[derive(Debug)]
pub enum Discovery {
    Found {
        first_page: Vec<MinuteRow>,
        last_page: u32,
    },
    /// Page 1 loaded but carried no rows.
    Empty,
    Failed(AppError),
}

pub async fn discover<S: PageSource>(
    client: &PageClient<S>,
    limiter: &RequestLimiter,
    symbol: &str,
    date: NaiveDate,
) -> Discovery {
    match client.fetch_minute_page(limiter, symbol, date, 1).await {
        Ok(page) if page.rows.is_empty() => Discovery::Empty,
        Ok(page) => {
            let mut last_page = page.last_page.max(1);
            if last_page > client.max_pages() {
                log::warn!(
                    "{symbol}: last page {last_page} exceeds the limit, fetching {} page(s)",
                    client.max_pages()
                );
                last_page = client.max_pages();
            }
            Discovery::Found {
                first_page: page.rows,
                last_page,
            }
        }
        Err(err) => Discovery::Failed(err),
    }
}

/// Collect every intraday row of `symbol` up to the end of `date`.
///
/// Never fails: a symbol whose first page is unusable yields nothing, and any
/// later page that fails simply contributes no rows.
pub async fn collect_symbol<S: PageSource>(
    client: &PageClient<S>,
    limiter: &RequestLimiter,
    symbol: &str,
    date: NaiveDate,
) -> Vec<MinuteRow> {
    let (first_page, last_page) = match discover(client, limiter, symbol, date).await {
        Discovery::Found {
            first_page,
            last_page,
        } => (first_page, last_page),
        Discovery::Empty => {
            log::debug!("{symbol}: no intraday rows on page 1");
            return Vec::new();
        }
        Discovery::Failed(err) => {
            log::warn!("{symbol}: first page failed: {err}");
            return Vec::new();
        }
    };

    let mut pages = vec![first_page];

    if last_page > 1 {
        // buffered yields in request order, so pages stay in page-number order.
        let rest: Vec<Vec<MinuteRow>> = stream::iter(2..=last_page)
            .map(|page| client.minute_rows_or_empty(limiter, symbol, date, page))
            .buffered(limiter.capacity().max(1))
            .collect()
            .await;
        pages.extend(rest);
    }

    log::debug!("{symbol}: merged {last_page} page(s)");
    merge_pages(pages)
}

/// Union of `pages`, one row per `time`, ascending by `time`.
///
/// The first occurrence of a timestamp wins. Callers pass pages in page-number
/// order, so on conflict the lowest page number is kept.
pub fn merge_pages<I>(pages: I) -> Vec<MinuteRow>
where
    I: IntoIterator<Item = Vec<MinuteRow>>,
{
    let mut unique: BTreeMap<String, MinuteRow> = BTreeMap::new();
    for row in pages.into_iter().flatten() {
        unique.entry(row.time.clone()).or_insert(row);
    }
    unique.into_values().collect()
}
