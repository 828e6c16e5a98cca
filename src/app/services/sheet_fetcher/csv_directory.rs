//! Sheet source backed by a directory of CSV exports
//!
//! Each sheet is expected as `<root>/<sheet name>.csv`, exported whole (cell
//! A1 is the first cell of the file). The requested range is cut out of the
//! grid the same way the spreadsheet service would return it.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::SheetFetcher;
use crate::app::models::RawRow;
use crate::app::services::schema_registry::CellRange;
use crate::constants::EXPORT_EXTENSION;
use crate::{Error, Result};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads sheets from CSV files in one directory
#[derive(Debug, Clone)]
pub struct CsvDirectoryFetcher {
    root: PathBuf,
}

impl CsvDirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the export of `sheet_name` is expected at
    pub fn export_path(&self, sheet_name: &str) -> PathBuf {
        self.root.join(format!("{sheet_name}.{EXPORT_EXTENSION}"))
    }

    /// Names of the sheets exported to the directory, sorted
    pub fn available_sheets(&self) -> Result<Vec<String>> {
        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            EXPORT_EXTENSION
        );

        let paths = glob::glob(&pattern).map_err(|e| {
            Error::configuration(format!("Invalid export directory pattern {pattern}: {e}"))
        })?;

        let mut sheets = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) => {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        sheets.push(stem.to_string());
                    }
                }
                Err(e) => warn!("Skipping unreadable export: {}", e),
            }
        }

        sheets.sort();
        Ok(sheets)
    }

    fn parse_grid(&self, path: &Path, content: &str) -> Result<Vec<RawRow>> {
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut grid = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| {
                Error::csv_parsing(
                    path.display().to_string(),
                    "Failed to read CSV record",
                    Some(e),
                )
            })?;
            grid.push(record.iter().map(str::to_string).collect());
        }
        Ok(grid)
    }
}

impl SheetFetcher for CsvDirectoryFetcher {
    async fn fetch(&self, sheet_name: &str, range: &CellRange) -> Result<Vec<RawRow>> {
        if sheet_name.is_empty() || sheet_name.contains(['/', '\\']) {
            return Err(Error::sheet_fetch(
                sheet_name,
                "sheet name cannot be mapped to an export file",
            ));
        }

        let path = self.export_path(sheet_name);
        debug!("Reading {} from {}", range.qualified(sheet_name), path.display());

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            Error::sheet_fetch(
                sheet_name,
                format!("failed to read {}: {}", path.display(), e),
            )
        })?;

        let grid = self.parse_grid(&path, &content)?;
        Ok(range.slice(&grid))
    }
}
