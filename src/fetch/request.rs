use chrono::NaiveDate;

/// Which upstream page family a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Day,
    Minute,
}

/// Query parameters for one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub symbol: String,
    pub page: u32,
    pub thistime: Option<String>,
}

impl PageQuery {
    /// The daily listing is always read from its first page.
    pub fn daily(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            page: 1,
            thistime: None,
        }
    }

    pub fn minute(symbol: &str, date: NaiveDate, page: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            page,
            thistime: Some(end_of_day_stamp(date)),
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("code", self.symbol.clone()),
            ("page", self.page.to_string()),
        ];
        if let Some(stamp) = &self.thistime {
            params.push(("thistime", stamp.clone()));
        }
        params
    }
}

/// Upper bound for intraday listings: the last second of `date`.
pub fn end_of_day_stamp(date: NaiveDate) -> String {
    format!("{}235959", date.format("%Y%m%d"))
}
