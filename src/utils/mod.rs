pub mod time;

pub use time::{parse_date, today};
