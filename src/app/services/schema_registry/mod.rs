//! Sheet schema registry
//!
//! This module describes which sheets feed the dashboard and how each one is
//! read: its A1 cell range, which semantic field lives in which column, and
//! which columns must be filled for a row to count.
//!
//! ## Architecture
//!
//! - [`range`] - A1 range parsing, rendering and grid slicing
//! - [`schema`] - [`SheetSchema`], [`SchemaKind`] and [`ColumnMapping`]
//! - [`registry`] - The ordered, validated [`SchemaRegistry`]
//!
//! ## Usage
//!
//! ```rust
//! use ad_dashboard_feed::app::services::schema_registry::SchemaRegistry;
//!
//! let registry = SchemaRegistry::builtin();
//! for schema in registry.iter() {
//!     println!("{} -> {}", schema.key, schema.qualified_range());
//! }
//! ```

pub mod range;
pub mod registry;
pub mod schema;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use range::CellRange;
pub use registry::SchemaRegistry;
pub use schema::{ColumnMapping, SchemaKind, SheetSchema};
