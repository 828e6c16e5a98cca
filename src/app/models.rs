//! Core data models for the dashboard feed
//!
//! Raw spreadsheet rows come in, typed [`Record`]s and a [`CampaignList`]
//! go out. Everything here is plain data; parsing lives in the services.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One spreadsheet row as returned by a fetcher, cells in column order
///
/// Rows may be shorter than the sheet is wide: trailing empty cells are
/// usually omitted by the spreadsheet API.
pub type RawRow = Vec<String>;

/// Semantic fields a sheet column can be mapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Date,
    CampaignName,
    GroupName,
    Gender,
    Cost,
    Impressions,
    Clicks,
    Conversions,
}

/// How a field's raw cell is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Date,
    Text,
    Number,
}

impl Field {
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Date => FieldKind::Date,
            Field::CampaignName | Field::GroupName | Field::Gender => FieldKind::Text,
            Field::Cost | Field::Impressions | Field::Clicks | Field::Conversions => {
                FieldKind::Number
            }
        }
    }

    /// Property name used in the JSON payload
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::CampaignName => "campaignName",
            Field::GroupName => "groupName",
            Field::Gender => "gender",
            Field::Cost => "cost",
            Field::Impressions => "impressions",
            Field::Clicks => "clicks",
            Field::Conversions => "conversions",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized row of advertising data
///
/// `group_name` is present only for ad-group sheets and `gender` only for
/// gender breakdown sheets; absent dimensions are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Reporting day, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    #[serde(default)]
    pub campaign_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub impressions: f64,
    #[serde(default)]
    pub clicks: f64,
    #[serde(default)]
    pub conversions: f64,
}

impl Record {
    /// Create a record with zeroed metrics and no dimension
    pub fn new(date: NaiveDate, campaign_name: impl Into<String>) -> Self {
        Self {
            date,
            campaign_name: campaign_name.into(),
            group_name: None,
            gender: None,
            cost: 0.0,
            impressions: 0.0,
            clicks: 0.0,
            conversions: 0.0,
        }
    }

    /// Date in canonical `YYYY-MM-DD` form
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Campaign name, if the row carried a non-blank one
    pub fn campaign(&self) -> Option<&str> {
        let name = self.campaign_name.as_str();
        (!name.trim().is_empty()).then_some(name)
    }

    /// Set a text field; non-text fields are ignored
    pub fn set_text(&mut self, field: Field, value: String) {
        match field {
            Field::CampaignName => self.campaign_name = value,
            Field::GroupName => self.group_name = Some(value),
            Field::Gender => self.gender = Some(value),
            _ => {}
        }
    }

    /// Set a numeric field; non-numeric fields are ignored
    pub fn set_number(&mut self, field: Field, value: f64) {
        match field {
            Field::Cost => self.cost = value,
            Field::Impressions => self.impressions = value,
            Field::Clicks => self.clicks = value,
            Field::Conversions => self.conversions = value,
            _ => {}
        }
    }
}

/// All records parsed from one sheet, in sheet order
pub type Dataset = Vec<Record>;

/// Why a raw row did not become a [`Record`]
///
/// Both causes exclude the row; they are kept apart for logging and
/// statistics only.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    /// A required column is absent or blank
    #[error("required column {index} is empty")]
    MissingRequired { index: usize },

    /// The date cell could not be read as a date
    #[error("unparseable date '{raw}'")]
    InvalidDate { raw: String },
}

/// Sorted, deduplicated campaign names headed by the sentinel entry
///
/// Built by the campaign aggregator; the first element is always the
/// sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignList(Vec<String>);

impl CampaignList {
    /// Wrap an already-aggregated list; `entries[0]` must be the sentinel
    pub(crate) fn from_entries(entries: Vec<String>) -> Self {
        Self(entries)
    }

    /// The "no filter" entry at the head of the list
    pub fn sentinel(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    /// Real campaign names, sentinel excluded
    pub fn names(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    /// All entries, sentinel first
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|n| n == name)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
