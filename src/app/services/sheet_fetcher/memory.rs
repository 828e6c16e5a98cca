//! In-memory sheet source

use std::collections::HashMap;

use super::SheetFetcher;
use crate::app::models::RawRow;
use crate::app::services::schema_registry::CellRange;
use crate::{Error, Result};

/// Serves rows already held in memory
///
/// Each sheet's rows are returned as stored, whatever range is asked for:
/// they stand for what the spreadsheet service returned for that range.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    sheets: HashMap<String, Vec<RawRow>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a sheet, builder style
    pub fn with_sheet(mut self, sheet_name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        self.insert(sheet_name, rows);
        self
    }

    /// Add or replace a sheet
    pub fn insert(&mut self, sheet_name: impl Into<String>, rows: Vec<RawRow>) {
        self.sheets.insert(sheet_name.into(), rows);
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

impl SheetFetcher for MemoryFetcher {
    async fn fetch(&self, sheet_name: &str, _range: &CellRange) -> Result<Vec<RawRow>> {
        self.sheets
            .get(sheet_name)
            .cloned()
            .ok_or_else(|| Error::sheet_fetch(sheet_name, "no such sheet"))
    }
}
