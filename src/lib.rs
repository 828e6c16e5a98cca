//! Ad Dashboard Feed Library
//!
//! A Rust library for turning advertising-performance spreadsheets into the
//! JSON feed consumed by a campaign dashboard.
//!
//! This library provides tools for:
//! - Tolerant parsing of human-edited cells (currency amounts, mixed date formats)
//! - A validated registry of sheet schemas (name, A1 range, column mapping, required columns)
//! - Row parsing into typed records with per-cause rejection tracking
//! - Fetcher adapters that degrade failed fetches to empty sheets
//! - Cross-sheet campaign aggregation with an "all campaigns" sentinel
//! - JSON serialization of the complete dashboard payload

pub mod config;
pub mod constants;
pub mod pipeline;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod campaign_aggregator;
        pub mod dataset_builder;
        pub mod row_parser;
        pub mod schema_registry;
        pub mod serializer;
        pub mod sheet_fetcher;
        pub mod value_parsers;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CampaignList, Dataset, Field, RawRow, Record, RowRejection};
pub use app::services::schema_registry::{CellRange, SchemaKind, SchemaRegistry, SheetSchema};
pub use app::services::serializer::DashboardPayload;
pub use config::Config;
pub use pipeline::{Pipeline, PipelineOutput, PipelineStats};

/// Result type alias for the dashboard feed
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for feed generation
///
/// Row-level problems are not errors; they are reported as [`RowRejection`]
/// and only ever counted and logged.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// A sheet could not be fetched from its source
    #[error("Failed to fetch sheet '{sheet}': {message}")]
    SheetFetch { sheet: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A sheet schema violates a registry invariant
    #[error("Invalid schema '{schema}': {message}")]
    SchemaValidation { schema: String, message: String },

    /// Malformed A1 cell range
    #[error("Invalid cell range '{range}': {message}")]
    InvalidRange { range: String, message: String },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a sheet fetch error
    pub fn sheet_fetch(sheet: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SheetFetch {
            sheet: sheet.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a schema validation error
    pub fn schema_validation(schema: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaValidation {
            schema: schema.into(),
            message: message.into(),
        }
    }

    /// Create an invalid range error
    pub fn invalid_range(range: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRange {
            range: range.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
