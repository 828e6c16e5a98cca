//! Sheet schema descriptors
//!
//! A [`SheetSchema`] is everything needed to read one sheet: where it lives,
//! which parser variant applies, the column of each semantic field, and the
//! columns that must be non-empty.

use super::range::CellRange;
use crate::app::models::{Field, RawRow};
use crate::constants::{CAMPAIGNS_KEY, columns, gender_sheet, group_sheet, performance_sheet};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The closed set of row layouts the dashboard understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Per ad group totals; carries `groupName`
    Group,
    /// Per campaign totals
    Performance,
    /// Per gender breakdown; carries `gender`
    Gender,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 3] = [SchemaKind::Group, SchemaKind::Performance, SchemaKind::Gender];

    /// Fields produced by rows of this kind
    pub fn fields(self) -> &'static [Field] {
        match self {
            SchemaKind::Group => &[
                Field::Date,
                Field::CampaignName,
                Field::GroupName,
                Field::Cost,
                Field::Impressions,
                Field::Clicks,
                Field::Conversions,
            ],
            SchemaKind::Performance => &[
                Field::Date,
                Field::CampaignName,
                Field::Cost,
                Field::Impressions,
                Field::Clicks,
                Field::Conversions,
            ],
            SchemaKind::Gender => &[
                Field::Date,
                Field::CampaignName,
                Field::Gender,
                Field::Cost,
                Field::Impressions,
                Field::Clicks,
                Field::Conversions,
            ],
        }
    }

    /// Column layout of the standard report sheets
    pub fn default_columns(self) -> ColumnMapping {
        self.fields()
            .iter()
            .map(|&field| {
                let index = match field {
                    Field::Date => columns::DATE,
                    Field::CampaignName => columns::CAMPAIGN,
                    Field::GroupName => columns::AD_GROUP,
                    Field::Gender => columns::GENDER,
                    Field::Cost => columns::COST,
                    Field::Impressions => columns::IMPRESSIONS,
                    Field::Clicks => columns::CLICKS,
                    Field::Conversions => columns::CONVERSIONS,
                };
                (field, index)
            })
            .collect()
    }

    /// Date plus the identifying dimension of each kind
    pub fn default_required(self) -> BTreeSet<usize> {
        let dimension = match self {
            SchemaKind::Group => columns::AD_GROUP,
            SchemaKind::Performance => columns::CAMPAIGN,
            SchemaKind::Gender => columns::GENDER,
        };
        BTreeSet::from([columns::DATE, dimension])
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaKind::Group => "group",
            SchemaKind::Performance => "performance",
            SchemaKind::Gender => "gender",
        };
        f.write_str(name)
    }
}

/// Semantic field to raw column index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    field_to_index: BTreeMap<Field, usize>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `field` to `index`, replacing any earlier mapping
    pub fn insert(&mut self, field: Field, index: usize) {
        self.field_to_index.insert(field, index);
    }

    /// Get the column index for a field
    pub fn get_index(&self, field: Field) -> Option<usize> {
        self.field_to_index.get(&field).copied()
    }

    /// Check if a field is mapped
    pub fn has_field(&self, field: Field) -> bool {
        self.field_to_index.contains_key(&field)
    }

    /// Whether any field reads column `index`
    pub fn references(&self, index: usize) -> bool {
        self.field_to_index.values().any(|&i| i == index)
    }

    /// Raw cell for `field`, `None` when unmapped or past the end of the row
    pub fn cell<'a>(&self, row: &'a RawRow, field: Field) -> Option<&'a str> {
        self.get_index(field)
            .and_then(|index| row.get(index))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, usize)> + '_ {
        self.field_to_index.iter().map(|(&field, &index)| (field, index))
    }

    pub fn len(&self) -> usize {
        self.field_to_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_to_index.is_empty()
    }
}

impl FromIterator<(Field, usize)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (Field, usize)>>(iter: I) -> Self {
        Self {
            field_to_index: iter.into_iter().collect(),
        }
    }
}

/// Parsing configuration for one sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSchema {
    /// Property name of this sheet's dataset in the payload
    pub key: String,
    /// Sheet (tab) name in the spreadsheet
    pub name: String,
    pub range: CellRange,
    pub kind: SchemaKind,
    /// Columns that must be non-blank for a row to produce a record
    pub required_columns: BTreeSet<usize>,
    pub columns: ColumnMapping,
}

impl SheetSchema {
    /// One of the three standard report sheets
    pub fn builtin(kind: SchemaKind) -> Self {
        let (key, name, last_column) = match kind {
            SchemaKind::Group => (group_sheet::KEY, group_sheet::NAME, group_sheet::LAST_COLUMN),
            SchemaKind::Performance => (
                performance_sheet::KEY,
                performance_sheet::NAME,
                performance_sheet::LAST_COLUMN,
            ),
            SchemaKind::Gender => (
                gender_sheet::KEY,
                gender_sheet::NAME,
                gender_sheet::LAST_COLUMN,
            ),
        };

        Self {
            key: key.to_string(),
            name: name.to_string(),
            range: CellRange::columns(0, last_column),
            kind,
            required_columns: kind.default_required(),
            columns: kind.default_columns(),
        }
    }

    /// `'Sheet'!A:J` form used to address this sheet
    pub fn qualified_range(&self) -> String {
        self.range.qualified(&self.name)
    }

    /// Check the schema's own invariants
    ///
    /// Registry-wide rules (unique keys) are checked by the registry.
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| Err(Error::schema_validation(self.key.clone(), message));

        if self.key.trim().is_empty() {
            return fail("key must not be empty".to_string());
        }
        if self.key == CAMPAIGNS_KEY {
            return fail(format!("key '{CAMPAIGNS_KEY}' is reserved for the campaign list"));
        }
        if self.name.trim().is_empty() {
            return fail("sheet name must not be empty".to_string());
        }

        let produced = self.kind.fields();
        for &field in produced {
            if !self.columns.has_field(field) {
                return fail(format!("field '{field}' has no column mapping"));
            }
        }
        for (field, index) in self.columns.iter() {
            if !produced.contains(&field) {
                return fail(format!("field '{field}' is not part of {} sheets", self.kind));
            }
            if index >= self.range.width() {
                return fail(format!(
                    "field '{field}' maps to column {index}, outside range {} ({} columns)",
                    self.range,
                    self.range.width()
                ));
            }
        }

        for &index in &self.required_columns {
            if !self.columns.references(index) {
                return fail(format!("required column {index} is not mapped to any field"));
            }
        }

        Ok(())
    }
}
