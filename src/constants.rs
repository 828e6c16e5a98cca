//! Application constants for the dashboard feed
//!
//! This module contains the fixed labels, JSON property names and the
//! built-in sheet layout of the advertising report spreadsheet.

// =============================================================================
// Campaign List
// =============================================================================

/// Placeholder that heads every campaign list and means "no campaign filter"
pub const ALL_CAMPAIGNS: &str = "all campaigns";

/// JSON property holding the campaign list in the dashboard payload
pub const CAMPAIGNS_KEY: &str = "campaigns";

// =============================================================================
// Built-in Sheets
// =============================================================================

/// Ad group totals sheet
pub mod group_sheet {
    pub const KEY: &str = "group";
    pub const NAME: &str = "全_グループ集計";
    /// Last column of the sheet range, which always starts at `A`
    pub const LAST_COLUMN: usize = 9;
}

/// Campaign performance sheet
pub mod performance_sheet {
    pub const KEY: &str = "performance";
    pub const NAME: &str = "パフォーマンス";
    /// Last column of the sheet range, which always starts at `A`
    pub const LAST_COLUMN: usize = 7;
}

/// Gender breakdown sheet
pub mod gender_sheet {
    pub const KEY: &str = "gender";
    pub const NAME: &str = "性別";
    /// Last column of the sheet range, which always starts at `A`
    pub const LAST_COLUMN: usize = 8;
}

// =============================================================================
// Column Positions (0-based, relative to the start of the range)
// =============================================================================

/// Columns shared by every built-in sheet
pub mod columns {
    pub const DATE: usize = 0;
    pub const CAMPAIGN: usize = 1;
    pub const AD_GROUP: usize = 2;
    pub const COST: usize = 3;
    pub const IMPRESSIONS: usize = 4;
    pub const CLICKS: usize = 5;
    pub const CONVERSIONS: usize = 7;
    pub const GENDER: usize = 8;
}

// =============================================================================
// Files and Logging
// =============================================================================

/// File extension of per-sheet exports read by the CSV fetcher
pub const EXPORT_EXTENSION: &str = "csv";

/// Directory name under the user config dir holding the default config file
pub const CONFIG_DIR_NAME: &str = "ad-dashboard-feed";

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Log target used for the default `EnvFilter` directive
pub const LOG_TARGET: &str = "ad_dashboard_feed";
