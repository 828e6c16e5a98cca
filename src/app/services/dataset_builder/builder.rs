//! Per-sheet dataset construction
//!
//! Drops the header row, parses every data row and keeps the ones that
//! produce records. Rejected rows are counted and logged at debug level,
//! never surfaced as errors.

use tracing::{debug, info};

use super::stats::{BuildStats, SheetOutcome};
use crate::app::models::RawRow;
use crate::app::services::row_parser::parse_row;
use crate::app::services::schema_registry::SheetSchema;

/// Build the dataset and campaign contribution of one sheet
///
/// `rows` is the fetcher output with the header as its first row. An empty
/// slice (for example after a failed fetch) gives an empty dataset.
pub fn build_dataset(schema: &SheetSchema, rows: &[RawRow]) -> SheetOutcome {
    let mut stats = BuildStats::new(schema.key.clone());
    let mut dataset = Vec::new();
    let mut campaigns = Vec::new();

    // Row 0 is the header; data starts on the next sheet row
    let data_rows = rows.get(1..).unwrap_or_default();
    let first_data_row = schema.range.first_row().saturating_add(1);

    for (offset, row) in data_rows.iter().enumerate() {
        stats.rows_seen += 1;

        match parse_row(schema, row) {
            Ok(record) => {
                if let Some(campaign) = record.campaign() {
                    campaigns.push(campaign.to_string());
                }
                dataset.push(record);
                stats.records_built += 1;
            }
            Err(rejection) => {
                debug!(
                    "Skipped {} row {}: {}",
                    schema.key,
                    first_data_row + offset,
                    rejection
                );
                stats.record_rejection(&rejection);
            }
        }
    }

    info!("{}", stats.summary());

    SheetOutcome {
        key: schema.key.clone(),
        dataset,
        campaigns,
        stats,
    }
}
