//! Build statistics and result structures for per-sheet dataset building

use crate::app::models::{Dataset, RowRejection};
use serde::Serialize;

/// Everything one sheet contributes to a pipeline run
#[derive(Debug, Clone)]
pub struct SheetOutcome {
    /// Payload key of the sheet's schema
    pub key: String,

    /// Records in sheet order
    pub dataset: Dataset,

    /// Non-blank campaign names of the accepted records, in sheet order
    pub campaigns: Vec<String>,

    pub stats: BuildStats,
}

/// Row accounting for one sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Payload key of the sheet's schema
    pub key: String,

    /// Data rows seen, header excluded
    pub rows_seen: usize,

    /// Rows that became records
    pub records_built: usize,

    /// Rows rejected for a blank required column
    pub missing_required: usize,

    /// Rows rejected for an unparseable date
    pub invalid_date: usize,

    /// The fetch failed and the sheet was treated as empty
    pub fetch_degraded: bool,
}

impl BuildStats {
    /// Create new empty statistics for a sheet
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Count a rejected row under its cause
    pub fn record_rejection(&mut self, rejection: &RowRejection) {
        match rejection {
            RowRejection::MissingRequired { .. } => self.missing_required += 1,
            RowRejection::InvalidDate { .. } => self.invalid_date += 1,
        }
    }

    /// Total rows rejected
    pub fn rows_rejected(&self) -> usize {
        self.missing_required + self.invalid_date
    }

    /// Percentage of data rows that became records
    pub fn success_rate(&self) -> f64 {
        if self.rows_seen == 0 {
            100.0
        } else {
            (self.records_built as f64 / self.rows_seen as f64) * 100.0
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        if self.fetch_degraded {
            return format!("{}: fetch failed, sheet treated as empty", self.key);
        }
        format!(
            "{}: {} records from {} rows ({} missing required, {} bad dates)",
            self.key, self.records_built, self.rows_seen, self.missing_required, self.invalid_date
        )
    }
}
