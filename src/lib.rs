pub mod app;
pub mod batch;
pub mod cli;
pub mod config;
pub mod daily;
pub mod error;
pub mod fetch;
pub mod minute;
pub mod model;
pub mod output;
pub mod parse;
pub mod symbols;
pub mod utils;

pub use error::{AppError, Result};
