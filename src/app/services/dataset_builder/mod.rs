//! Dataset building for fetched sheets
//!
//! This module turns the raw rows of one sheet into its [`Dataset`] and the
//! campaign names that sheet contributes to the shared campaign list.
//!
//! # Architecture
//!
//! - [`builder`] - Header handling, per-row parsing and filtering
//! - [`stats`] - Per-sheet build statistics and result structures
//!
//! Each sheet is built independently; nothing here touches the global
//! campaign list, so sheets can be fetched and built concurrently and merged
//! afterwards.
//!
//! # Example Usage
//!
//! ```rust
//! use ad_dashboard_feed::app::services::dataset_builder::build_dataset;
//! use ad_dashboard_feed::{SchemaKind, SheetSchema};
//!
//! let schema = SheetSchema::builtin(SchemaKind::Performance);
//! let rows = vec![
//!     vec!["日付".to_string(), "キャンペーン".to_string()],
//!     vec!["2025/10/09".to_string(), "Brand".to_string()],
//! ];
//!
//! let outcome = build_dataset(&schema, &rows);
//! assert_eq!(outcome.dataset.len(), 1);
//! assert_eq!(outcome.campaigns, vec!["Brand".to_string()]);
//! ```
//!
//! [`Dataset`]: crate::app::models::Dataset

pub mod builder;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use builder::build_dataset;
pub use stats::{BuildStats, SheetOutcome};
