use std::time::Duration;

use chrono::NaiveDate;

use crate::config::DEFAULT_MAX_PAGES;
use crate::error::AppError;
use crate::model::MinuteRow;
use crate::parse::{parse_minute_page, MinutePage};

use super::decode::decode_body;
use super::{Endpoint, FetchResult, PageQuery, PageSource, RequestLimiter};

/// Issues single page requests against a `PageSource`.
///
/// Every call takes the run's `RequestLimiter` explicitly and holds one permit
/// for exactly the duration of the transport call.
pub struct PageClient<S> {
    source: S,
    timeout: Duration,
    max_pages: u32,
}

impl<S: PageSource> PageClient<S> {
    pub fn new(source: S, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Upper bound on the pages fetched for one symbol, whatever the site's
    /// navigation link claims.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and decode one page body.
    pub async fn fetch_text(
        &self,
        limiter: &RequestLimiter,
        endpoint: Endpoint,
        query: &PageQuery,
    ) -> FetchResult<String> {
        let _permit = limiter.acquire().await?;
        let bytes = tokio::time::timeout(self.timeout, self.source.fetch(endpoint, query))
            .await
            .map_err(|_| AppError::Timeout(self.timeout))??;

        Ok(decode_body(&bytes).into_owned())
    }

    pub async fn fetch_minute_page(
        &self,
        limiter: &RequestLimiter,
        symbol: &str,
        date: NaiveDate,
        page: u32,
    ) -> FetchResult<MinutePage> {
        let query = PageQuery::minute(symbol, date, page);
        let text = self.fetch_text(limiter, Endpoint::Minute, &query).await?;
        Ok(parse_minute_page(symbol, &text))
    }

    /// Rows of one intraday page; any failure yields no rows.
    pub async fn minute_rows_or_empty(
        &self,
        limiter: &RequestLimiter,
        symbol: &str,
        date: NaiveDate,
        page: u32,
    ) -> Vec<MinuteRow> {
        match self.fetch_minute_page(limiter, symbol, date, page).await {
            Ok(parsed) => parsed.rows,
            Err(err) => {
                log::debug!("{symbol} page {page} dropped: {err}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::{minute_page_html, FakeResponse, FakeSource};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date")
    }

    #[tokio::test]
    async fn parses_successful_page() {
        let source = FakeSource::new().minute(
            "005930",
            1,
            FakeResponse::body(minute_page_html(&[("09:00", "100", "5")], Some(4))),
        );
        let client = PageClient::new(source, Duration::from_secs(1));
        let limiter = RequestLimiter::new(1);

        let page = client
            .fetch_minute_page(&limiter, "005930", date(), 1)
            .await
            .expect("page");
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.last_page, 4);
        assert_eq!(limiter.available(), 1);
    }

    #[tokio::test]
    async fn error_status_is_typed_and_releases_permit() {
        let source = FakeSource::new().minute("005930", 1, FakeResponse::Status(503));
        let client = PageClient::new(source, Duration::from_secs(1));
        let limiter = RequestLimiter::new(1);

        let err = client
            .fetch_minute_page(&limiter, "005930", date(), 1)
            .await
            .expect_err("status should fail");
        assert!(matches!(err, AppError::Status(status) if status.as_u16() == 503));
        assert_eq!(limiter.available(), 1);
    }

    #[tokio::test]
    async fn stalled_request_times_out_and_releases_permit() {
        let source = FakeSource::new().minute("005930", 2, FakeResponse::Hang);
        let client = PageClient::new(source, Duration::from_millis(50));
        let limiter = RequestLimiter::new(1);

        let rows = client
            .minute_rows_or_empty(&limiter, "005930", date(), 2)
            .await;
        assert!(rows.is_empty());
        assert_eq!(limiter.available(), 1);

        let err = client
            .fetch_minute_page(&limiter, "005930", date(), 2)
            .await
            .expect_err("hang should time out");
        assert!(matches!(err, AppError::Timeout(_)));
    }

    #[tokio::test]
    async fn sends_end_of_day_bound() {
        let source = FakeSource::new();
        let client = PageClient::new(source, Duration::from_secs(1));
        let limiter = RequestLimiter::new(1);

        let _ = client
            .minute_rows_or_empty(&limiter, "005930", date(), 3)
            .await;

        let calls = client.source().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].page, 3);
        assert_eq!(calls[0].thistime.as_deref(), Some("20250110235959"));
    }
}
