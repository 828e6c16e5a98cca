//! Ordered, validated collection of sheet schemas
//!
//! The registry is built once at startup. Construction validates every
//! schema, so code holding a [`SchemaRegistry`] never meets a malformed one.

use super::schema::{SchemaKind, SheetSchema};
use crate::{Error, Result};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRegistry {
    schemas: Vec<SheetSchema>,
}

impl SchemaRegistry {
    /// Validate `schemas` and keep them in the given order
    pub fn new(schemas: Vec<SheetSchema>) -> Result<Self> {
        if schemas.is_empty() {
            return Err(Error::configuration("at least one sheet schema is required"));
        }

        let mut seen = HashSet::new();
        for schema in &schemas {
            schema.validate()?;
            if !seen.insert(schema.key.as_str()) {
                return Err(Error::schema_validation(
                    schema.key.clone(),
                    "duplicate schema key",
                ));
            }
        }

        debug!(
            "Schema registry ready: {}",
            schemas
                .iter()
                .map(|s| format!("{}={}", s.key, s.qualified_range()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self { schemas })
    }

    /// The standard group, performance and gender sheets
    pub fn builtin() -> Self {
        Self {
            schemas: SchemaKind::ALL.into_iter().map(SheetSchema::builtin).collect(),
        }
    }

    /// Look up a schema by payload key
    pub fn get(&self, key: &str) -> Option<&SheetSchema> {
        self.schemas.iter().find(|schema| schema.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SheetSchema> {
        self.schemas.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|schema| schema.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl<'a> IntoIterator for &'a SchemaRegistry {
    type Item = &'a SheetSchema;
    type IntoIter = std::slice::Iter<'a, SheetSchema>;

    fn into_iter(self) -> Self::IntoIter {
        self.schemas.iter()
    }
}
