//! Test utilities for schema registry testing

use crate::app::models::Field;
use crate::app::services::schema_registry::{CellRange, ColumnMapping, SchemaKind, SheetSchema};
use std::collections::BTreeSet;


/// Group-style schema laid out like the standard ad group sheet
pub fn create_group_schema(key: &str) -> SheetSchema {
    SheetSchema {
        key: key.to_string(),
        name: "Ad Groups".to_string(),
        range: CellRange::parse("A:J").unwrap(),
        kind: SchemaKind::Group,
        required_columns: BTreeSet::from([0, 2]),
        columns: ColumnMapping::from_iter([
            (Field::Date, 0),
            (Field::CampaignName, 1),
            (Field::GroupName, 2),
            (Field::Cost, 3),
            (Field::Impressions, 4),
            (Field::Clicks, 5),
            (Field::Conversions, 7),
        ]),
    }
}
