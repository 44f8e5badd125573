use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::AppError;

use super::{Endpoint, FetchResult, PageQuery, PageSource};

#[derive(Debug, Clone)]
pub enum FakeResponse {
    Body(Vec<u8>),
    Status(u16),
    Hang,
}

impl FakeResponse {
    pub fn body(html: impl Into<String>) -> Self {
        FakeResponse::Body(html.into().into_bytes())
    }
}

/// In-memory page source keyed by (endpoint, symbol, page).
///
/// Unknown pages answer 404. Every call is recorded and the number of calls
/// in progress is tracked so tests can assert on the limiter.
#[derive(Default)]
pub struct FakeSource {
    responses: HashMap<(Endpoint, String, u32), FakeResponse>,
    delay: Duration,
    calls: Mutex<Vec<(Endpoint, PageQuery)>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn minute(mut self, symbol: &str, page: u32, response: FakeResponse) -> Self {
        self.responses
            .insert((Endpoint::Minute, symbol.to_string(), page), response);
        self
    }

    pub fn day(mut self, symbol: &str, response: FakeResponse) -> Self {
        self.responses
            .insert((Endpoint::Day, symbol.to_string(), 1), response);
        self
    }

    pub fn calls(&self) -> Vec<PageQuery> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .map(|(_, query)| query.clone())
            .collect()
    }

    pub fn calls_for(&self, symbol: &str) -> Vec<u32> {
        let mut pages: Vec<u32> = self
            .calls()
            .into_iter()
            .filter(|query| query.symbol == symbol)
            .map(|query| query.page)
            .collect();
        pages.sort_unstable();
        pages
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for FakeSource {
    async fn fetch(&self, endpoint: Endpoint, query: &PageQuery) -> FetchResult<Vec<u8>> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((endpoint, query.clone()));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        let response = self
            .responses
            .get(&(endpoint, query.symbol.clone(), query.page))
            .cloned()
            .unwrap_or(FakeResponse::Status(404));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match response {
            FakeResponse::Body(bytes) => Ok(bytes),
            FakeResponse::Status(code) => Err(AppError::Status(
                StatusCode::from_u16(code).expect("valid status code"),
            )),
            FakeResponse::Hang => std::future::pending().await,
        }
    }
}

/// Minimal `sise_time` page: one table row of seven `span.tah` cells per entry.
pub fn minute_page_html(rows: &[(&str, &str, &str)], last_page: Option<u32>) -> String {
    let mut html = String::from("<html><body><table class=\"type2\">");
    for (time, price, volume) in rows {
        html.push_str("<tr>");
        for cell in [*time, *price, "0", *price, *price, *volume, *volume] {
            html.push_str(&format!("<td><span class=\"tah\">{cell}</span></td>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    if let Some(page) = last_page {
        html.push_str(&format!(
            "<table class=\"Nnavi\"><tr><td class=\"pgRR\">\
             <a href=\"/item/sise_time.nhn?code=X&amp;thistime=20250110235959&amp;page={page}\">last</a>\
             </td></tr></table>"
        ));
    }
    html.push_str("</body></html>");
    html
}

/// Minimal `sise_day` page. Entries are (date, open, high, low, close, volume).
pub fn daily_page_html(rows: &[(&str, &str, &str, &str, &str, &str)]) -> String {
    let mut html = String::from("<html><body><table class=\"type2\">");
    for (date, open, high, low, close, volume) in rows {
        html.push_str("<tr>");
        for cell in [*date, *close, "0", *open, *high, *low, *volume] {
            html.push_str(&format!("<td><span class=\"tah\">{cell}</span></td>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table></body></html>");
    html
}

/// `count` consecutive minutes starting at `start` (minutes after midnight),
/// listed newest first like the site does.
pub fn minute_rows(start: u32, count: u32) -> Vec<(String, String, String)> {
    (start..start + count)
        .rev()
        .map(|minute| {
            (
                format!("{:02}:{:02}", minute / 60, minute % 60),
                (70_000 + minute).to_string(),
                (minute % 97 + 1).to_string(),
            )
        })
        .collect()
}

pub fn minute_page_from(rows: &[(String, String, String)], last_page: Option<u32>) -> String {
    let borrowed: Vec<(&str, &str, &str)> = rows
        .iter()
        .map(|(time, price, volume)| (time.as_str(), price.as_str(), volume.as_str()))
        .collect();
    minute_page_html(&borrowed, last_page)
}
