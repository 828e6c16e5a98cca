//! Sheet fetching boundary
//!
//! Fetchers read the raw rows of a sheet range from wherever the spreadsheet
//! lives. The rest of the pipeline never sees their errors:
//! [`fetch_or_empty`] logs a failure and hands back an empty sheet.
//!
//! ## Implementations
//!
//! - [`MemoryFetcher`] - rows held in memory, keyed by sheet name
//! - [`CsvDirectoryFetcher`] - one full-sheet CSV export per sheet in a directory

pub mod csv_directory;
pub mod memory;

#[cfg(test)]
pub mod tests;

use std::future::Future;
use tracing::{debug, warn};

use crate::Result;
use crate::app::models::RawRow;
use crate::app::services::schema_registry::{CellRange, SheetSchema};

pub use csv_directory::CsvDirectoryFetcher;
pub use memory::MemoryFetcher;

/// Source of raw sheet rows
///
/// Implementations return the rows of `range` on `sheet_name`, header row
/// first, cells in column order starting at the range's first column. Any
/// timeout or retry policy belongs to the implementation.
pub trait SheetFetcher: Send + Sync {
    fn fetch(
        &self,
        sheet_name: &str,
        range: &CellRange,
    ) -> impl Future<Output = Result<Vec<RawRow>>> + Send;
}

/// Rows of one sheet after the fetch boundary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedSheet {
    pub rows: Vec<RawRow>,
    /// The fetch failed and `rows` is empty in its place
    pub degraded: bool,
}

/// Fetch a schema's sheet, degrading any failure to an empty sheet
pub async fn fetch_or_empty<F: SheetFetcher>(fetcher: &F, schema: &SheetSchema) -> FetchedSheet {
    match fetcher.fetch(&schema.name, &schema.range).await {
        Ok(rows) => {
            debug!("Fetched {} rows from {}", rows.len(), schema.qualified_range());
            FetchedSheet {
                rows,
                degraded: false,
            }
        }
        Err(error) => {
            warn!(
                "Treating {} as empty after fetch failure: {}",
                schema.qualified_range(),
                error
            );
            FetchedSheet {
                rows: Vec::new(),
                degraded: true,
            }
        }
    }
}
