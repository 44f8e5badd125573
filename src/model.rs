/// One intraday trade row. `time` is the fixed-width `HH:MM` stamp shown by the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinuteRow {
    pub symbol: String,
    pub price: String,
    pub volume: String,
    pub time: String,
}

impl MinuteRow {
    pub fn to_line(&self) -> String {
        [
            self.symbol.as_str(),
            self.price.as_str(),
            self.volume.as_str(),
            self.time.as_str(),
        ]
        .join("\t")
    }
}

/// One daily OHLCV bar. `date` is normalised to `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRow {
    pub date: String,
    pub close: String,
    pub delta: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub volume: String,
}

impl DailyRow {
    /// The site lists halted sessions with an opening price of zero.
    pub fn is_trading_day(&self) -> bool {
        self.open != "0"
    }

    pub fn to_line(&self, symbol: &str) -> String {
        [
            symbol,
            self.open.as_str(),
            self.high.as_str(),
            self.low.as_str(),
            self.close.as_str(),
            self.volume.as_str(),
        ]
        .join("\t")
    }
}
