//! Cell value parsers for human-edited spreadsheet data
//!
//! Cells arrive as display strings: currency symbols, thousands separators,
//! stray whitespace and a mix of date styles are all normal. Both parsers
//! here are total; bad input yields `0` or `None`, never an error.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Everything that cannot be part of a plain decimal number
static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]+").expect("static regex is valid"));

/// Date-only layouts, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y年%m月%d日",
    "%m/%d/%Y",
];

/// Date-time layouts whose time part is discarded
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Parse a numeric cell, falling back to `0` for anything unreadable
///
/// Every character other than ASCII digits, `.` and `-` is stripped first,
/// so `"¥1,234.56"` reads as `1234.56` and `" 1 000 "` as `1000`. If what
/// remains is not a valid decimal number (`""`, `"-"`, `"1.2.3"`, `"1-2"`)
/// the result is `0`. Values too large for `f64` also read as `0`.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned = NON_NUMERIC.replace_all(raw, "");
    if !is_plain_decimal(&cleaned) {
        return 0.0;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// `-?digits[.digits]`, with either digit run allowed to be empty but not both
fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    !(int_part.is_empty() && frac_part.is_empty()) && all_digits(int_part) && all_digits(frac_part)
}

/// Parse a date cell written in any of the common spreadsheet styles
///
/// Accepted: `2025-10-09`, `2025/10/09`, `2025.10.09`, `2025/1/5`,
/// `2025年10月9日`, `10/09/2025`, and date-times such as
/// `2025-10-09T08:30:00+09:00` or `2025/10/09 08:30` (time dropped).
/// Returns `None` for empty or unrecognised input.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let parsed = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|dt| dt.date())
        })?;

    // Anything outside four-digit years is a mis-read, e.g. "25-10-09"
    (1000..=9999).contains(&parsed.year()).then_some(parsed)
}

/// Parse a date cell to its canonical `YYYY-MM-DD` text
pub fn parse_date_iso(raw: &str) -> Option<String> {
    parse_date(raw).map(|date| date.format("%Y-%m-%d").to_string())
}
