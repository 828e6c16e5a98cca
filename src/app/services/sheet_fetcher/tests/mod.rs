//! Test utilities for sheet fetchers

use crate::app::models::RawRow;
use crate::app::services::schema_registry::CellRange;
use crate::app::services::sheet_fetcher::SheetFetcher;
use crate::{Error, Result};
use std::path::Path;


/// Fetcher whose every call fails
pub struct FailingFetcher;

impl SheetFetcher for FailingFetcher {
    async fn fetch(&self, sheet_name: &str, _range: &CellRange) -> Result<Vec<RawRow>> {
        Err(Error::sheet_fetch(sheet_name, "service unavailable"))
    }
}

/// Build raw rows from string slices
pub fn rows(cells: &[&[&str]]) -> Vec<RawRow> {
    cells
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

/// Write a sheet export into `dir`
pub fn write_export(dir: &Path, sheet_name: &str, content: &str) {
    std::fs::write(dir.join(format!("{sheet_name}.csv")), content).unwrap();
}
