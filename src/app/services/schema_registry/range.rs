//! A1 notation cell ranges
//!
//! Supports the forms used to address report sheets: whole columns
//! (`A:J`), bounded blocks (`A1:J500`), half-open blocks (`B2:H`) and single
//! cells (`C3`). Row-only ranges (`2:10`) are not supported.

use crate::app::models::RawRow;
use crate::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Most rows a spreadsheet can hold
pub const MAX_ROWS: usize = 10_000_000;

static A1_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{1,3})(\d+)?(?::([A-Za-z]{1,3})(\d+)?)?$").expect("static regex is valid")
});

/// A rectangular block of a sheet
///
/// Columns are 0-based indexes; rows are 1-based sheet row numbers as
/// written in the range. `None` bounds are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRange {
    start_col: usize,
    end_col: usize,
    start_row: Option<usize>,
    end_row: Option<usize>,
}

impl CellRange {
    /// Parse an A1 range such as `A:J` or `B2:H100`
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let caps = A1_RANGE
            .captures(trimmed)
            .ok_or_else(|| Error::invalid_range(text, "expected A1 notation like 'A:J' or 'A1:J100'"))?;

        let start_col = column_index(&caps[1])
            .ok_or_else(|| Error::invalid_range(text, "bad start column"))?;
        let start_row = caps.get(2).map(|m| parse_row_number(text, m.as_str())).transpose()?;

        let (end_col, end_row) = match caps.get(3) {
            Some(end) => {
                let end_col = column_index(end.as_str())
                    .ok_or_else(|| Error::invalid_range(text, "bad end column"))?;
                let end_row = caps.get(4).map(|m| parse_row_number(text, m.as_str())).transpose()?;
                (end_col, end_row)
            }
            None => {
                // A lone reference is a single cell and needs a row
                if start_row.is_none() {
                    return Err(Error::invalid_range(text, "single cell reference needs a row number"));
                }
                (start_col, start_row)
            }
        };

        if end_col < start_col {
            return Err(Error::invalid_range(text, "end column precedes start column"));
        }
        if let (Some(start), Some(end)) = (start_row, end_row) {
            if end < start {
                return Err(Error::invalid_range(text, "end row precedes start row"));
            }
        }

        Ok(Self {
            start_col,
            end_col,
            start_row,
            end_row,
        })
    }

    /// Whole columns `start_col..=end_col`, e.g. `columns(0, 9)` is `A:J`
    pub const fn columns(start_col: usize, end_col: usize) -> Self {
        let end_col = if end_col < start_col { start_col } else { end_col };
        Self {
            start_col,
            end_col,
            start_row: None,
            end_row: None,
        }
    }

    /// Number of columns covered
    pub fn width(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    /// First covered column, 0-based
    pub fn start_column(&self) -> usize {
        self.start_col
    }

    /// First covered sheet row (1-based)
    pub fn first_row(&self) -> usize {
        self.start_row.unwrap_or(1)
    }

    /// Last covered sheet row (1-based), if bounded
    pub fn last_row(&self) -> Option<usize> {
        self.end_row
    }

    /// Range prefixed with its sheet, e.g. `'Ad Groups'!A:J`
    ///
    /// Names made only of letters, digits and underscores are left bare;
    /// anything else is single-quoted with embedded quotes doubled.
    pub fn qualified(&self, sheet_name: &str) -> String {
        let bare = !sheet_name.is_empty()
            && sheet_name.chars().all(|c| c.is_alphanumeric() || c == '_');
        if bare {
            format!("{}!{}", sheet_name, self)
        } else {
            format!("'{}'!{}", sheet_name.replace('\'', "''"), self)
        }
    }

    /// Cut this range out of a full-sheet grid
    ///
    /// Mirrors what the spreadsheet API returns for the range: row 0 of the
    /// result is the first covered row, cell 0 of each row is the first
    /// covered column, and trailing empty cells and rows are dropped.
    pub fn slice(&self, grid: &[RawRow]) -> Vec<RawRow> {
        let skip = self.first_row() - 1;
        let take = match self.end_row {
            Some(end) => (end + 1).saturating_sub(self.first_row()),
            None => usize::MAX,
        };

        let mut rows: Vec<RawRow> = grid
            .iter()
            .skip(skip)
            .take(take)
            .map(|row| {
                let mut cells: RawRow = row
                    .iter()
                    .skip(self.start_col)
                    .take(self.width())
                    .cloned()
                    .collect();
                while cells.last().is_some_and(|cell| cell.trim().is_empty()) {
                    cells.pop();
                }
                cells
            })
            .collect();

        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        rows
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = column_letters(self.start_col);
        let end = column_letters(self.end_col);
        match (self.start_row, self.end_row) {
            (Some(sr), Some(er)) if sr == er && self.start_col == self.end_col => {
                write!(f, "{start}{sr}")
            }
            (Some(sr), Some(er)) => write!(f, "{start}{sr}:{end}{er}"),
            (Some(sr), None) => write!(f, "{start}{sr}:{end}"),
            (None, Some(er)) => write!(f, "{start}:{end}{er}"),
            (None, None) => write!(f, "{start}:{end}"),
        }
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CellRange {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CellRange> for String {
    fn from(range: CellRange) -> Self {
        range.to_string()
    }
}

fn parse_row_number(range: &str, digits: &str) -> Result<usize> {
    match digits.parse::<usize>() {
        Ok(row @ 1..=MAX_ROWS) => Ok(row),
        Ok(row) if row > MAX_ROWS => Err(Error::invalid_range(
            range,
            format!("row {row} is beyond the last sheet row {MAX_ROWS}"),
        )),
        _ => Err(Error::invalid_range(range, format!("bad row number '{digits}'"))),
    }
}

/// `A` -> 0, `Z` -> 25, `AA` -> 26
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0usize, |acc, c| {
        let c = c.to_ascii_uppercase();
        c.is_ascii_uppercase()
            .then(|| acc * 26 + (c as usize - 'A' as usize + 1))
    })
    .map(|n| n - 1)
}

/// 0 -> `A`, 25 -> `Z`, 26 -> `AA`
pub fn column_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
