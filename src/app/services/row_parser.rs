//! Individual row parsing
//!
//! Turns one raw spreadsheet row into a [`Record`] under a [`SheetSchema`],
//! or reports why it cannot. Rows never fail partially.

use crate::app::models::{Field, FieldKind, RawRow, Record, RowRejection};
use crate::app::services::schema_registry::SheetSchema;
use crate::app::services::value_parsers::{parse_date, parse_number};

/// Parse a single row
///
/// 1. Every required column must be present and non-blank.
/// 2. The date column must parse.
/// 3. Numeric fields go through [`parse_number`] (absent cells read as `0`),
///    text fields are copied verbatim (absent cells read as `""`).
pub fn parse_row(schema: &SheetSchema, row: &RawRow) -> Result<Record, RowRejection> {
    if let Some(&index) = schema
        .required_columns
        .iter()
        .find(|&&index| is_blank(row.get(index)))
    {
        return Err(RowRejection::MissingRequired { index });
    }

    let raw_date = schema.columns.cell(row, Field::Date).unwrap_or_default();
    let date = parse_date(raw_date).ok_or_else(|| RowRejection::InvalidDate {
        raw: raw_date.to_string(),
    })?;

    let mut record = Record::new(date, String::new());
    for &field in schema.kind.fields() {
        let cell = schema.columns.cell(row, field).unwrap_or_default();
        match field.kind() {
            FieldKind::Date => {}
            FieldKind::Text => record.set_text(field, cell.to_string()),
            FieldKind::Number => record.set_number(field, parse_number(cell)),
        }
    }

    Ok(record)
}

fn is_blank(cell: Option<&String>) -> bool {
    cell.is_none_or(|value| value.trim().is_empty())
}
