//! Field extraction for the Naver `sise_day` / `sise_time` listings.
//!
//! Both pages render every cell value inside `span.tah`, seven cells per
//! table row, and expose the final page through the `td.pgRR` link.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

use crate::model::{DailyRow, MinuteRow};

const FIELDS_PER_ROW: usize = 7;

lazy_static! {
    static ref CELL_SELECTOR: Selector =
        Selector::parse("span.tah").expect("Invalid cell selector");
    static ref LAST_PAGE_SELECTOR: Selector =
        Selector::parse("td.pgRR a").expect("Invalid navigation selector");
    static ref PAGE_PARAM_REGEX: Regex =
        Regex::new(r"page=([0-9]+)").expect("Invalid regex pattern");
}

/// Rows of one intraday page together with the pagination hint it carried.
#[derive(Debug, Clone, Default)]
pub struct MinutePage {
    pub rows: Vec<MinuteRow>,
    pub last_page: u32,
}

fn cell_values(document: &Html) -> Vec<String> {
    document
        .select(&CELL_SELECTOR)
        .map(|span| span.text().collect::<String>().trim().replace(',', ""))
        .collect()
}

/// Page index of the "last page" navigation link, or 1 when absent or unreadable.
fn last_page(document: &Html) -> u32 {
    document
        .select(&LAST_PAGE_SELECTOR)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .and_then(|href| PAGE_PARAM_REGEX.captures(href))
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
        .unwrap_or(1)
        .max(1)
}

pub fn parse_minute_page(symbol: &str, html: &str) -> MinutePage {
    let document = Html::parse_document(html);
    let values = cell_values(&document);

    // time, price, change, sell, buy, cumulative volume (unused), volume
    let rows = values
        .chunks_exact(FIELDS_PER_ROW)
        .map(|cells| MinuteRow {
            symbol: symbol.to_string(),
            price: cells[1].clone(),
            volume: cells[6].clone(),
            time: cells[0].clone(),
        })
        .collect();

    MinutePage {
        rows,
        last_page: last_page(&document),
    }
}

pub fn parse_daily_rows(html: &str) -> Vec<DailyRow> {
    let document = Html::parse_document(html);

    // date, close, delta, open, high, low, volume
    cell_values(&document)
        .chunks_exact(FIELDS_PER_ROW)
        .map(|cells| DailyRow {
            date: cells[0].replace('.', "-"),
            close: cells[1].clone(),
            delta: cells[2].clone(),
            open: cells[3].clone(),
            high: cells[4].clone(),
            low: cells[5].clone(),
            volume: cells[6].clone(),
        })
        .collect()
}
