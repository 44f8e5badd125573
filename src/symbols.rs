use std::collections::HashSet;
use std::path::Path;

use crate::error::{AppError, Context, Result};

/// Split a comma-separated symbol list, dropping blanks and repeats.
pub fn parse_symbol_list(list: &str) -> Vec<String> {
    dedup(list.split(',').map(str::trim).map(str::to_string))
}

/// Read one symbol per line. Only the first comma-separated field of a line is used.
pub fn load_symbol_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(AppError::invalid_input(format!(
            "symbol file not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open symbol file {}", path.display()))?;

    let mut codes = Vec::new();
    for result in reader.records() {
        let record = result.context("Failed to read symbol file record")?;
        if let Some(code) = record.get(0) {
            codes.push(code.to_string());
        }
    }

    Ok(dedup(codes))
}

fn dedup<I: IntoIterator<Item = String>>(codes: I) -> Vec<String> {
    let mut seen = HashSet::new();
    codes
        .into_iter()
        .filter(|code| !code.is_empty())
        .filter(|code| seen.insert(code.clone()))
        .collect()
}
