//! Configuration management and validation.
//!
//! Provides the run configuration: the campaign list sentinel, the sheets to
//! read and how their columns map to record fields, and output and fetch
//! preferences. Configuration is layered: built-in defaults, then an
//! optional JSON file, then command-line overrides.

use crate::app::services::schema_registry::{
    CellRange, ColumnMapping, SchemaKind, SchemaRegistry, SheetSchema,
};
use crate::constants::{ALL_CAMPAIGNS, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One sheet to read, as written in a config file
///
/// `required_columns` and `columns` fall back to the standard layout of the
/// sheet's kind when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetConfig {
    /// Payload property the sheet's records are published under
    pub key: String,

    /// Sheet (tab) name in the spreadsheet
    pub name: String,

    /// A1 range, e.g. `A:J`
    pub range: String,

    pub kind: SchemaKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_columns: Option<BTreeSet<usize>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnMapping>,
}

impl SheetConfig {
    /// Configuration of one of the standard report sheets
    pub fn builtin(kind: SchemaKind) -> Self {
        let schema = SheetSchema::builtin(kind);
        Self {
            range: schema.range.to_string(),
            key: schema.key,
            name: schema.name,
            kind,
            required_columns: None,
            columns: None,
        }
    }

    /// Resolve defaults and parse the range
    ///
    /// The result is not validated; [`SchemaRegistry::new`] does that.
    pub fn to_schema(&self) -> Result<SheetSchema> {
        let range = CellRange::parse(&self.range).map_err(|e| {
            Error::schema_validation(&self.key, format!("range '{}': {}", self.range, e))
        })?;

        Ok(SheetSchema {
            key: self.key.clone(),
            name: self.name.clone(),
            range,
            kind: self.kind,
            required_columns: self
                .required_columns
                .clone()
                .unwrap_or_else(|| self.kind.default_required()),
            columns: self
                .columns
                .clone()
                .unwrap_or_else(|| self.kind.default_columns()),
        })
    }
}

/// Output preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent the JSON payload
    pub pretty: bool,
}

/// Fetch preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Fetch all sheets at once instead of one after another
    pub concurrent: bool,
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// First entry of every campaign list, meaning "no filter"
    pub sentinel: String,

    /// Sheets to read, in payload order
    pub sheets: Vec<SheetConfig>,

    pub output: OutputConfig,

    pub fetch: FetchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sentinel: ALL_CAMPAIGNS.to_string(),
            sheets: SchemaKind::ALL.into_iter().map(SheetConfig::builtin).collect(),
            output: OutputConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Config {
    /// Set the campaign list sentinel
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Indent the JSON payload
    pub fn with_pretty_output(mut self) -> Self {
        self.output.pretty = true;
        self
    }

    /// Fetch sheets concurrently
    pub fn with_concurrent_fetch(mut self) -> Self {
        self.fetch.concurrent = true;
        self
    }

    /// `<user config dir>/ad-dashboard-feed/config.json`, if the platform has one
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a JSON config file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;

        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Defaults, overlaid by `explicit` or else the default config file
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }

        match Self::default_config_path() {
            Some(path) if path.is_file() => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                debug!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Build and validate the schema registry
    pub fn registry(&self) -> Result<SchemaRegistry> {
        let schemas = self
            .sheets
            .iter()
            .map(SheetConfig::to_schema)
            .collect::<Result<Vec<_>>>()?;
        SchemaRegistry::new(schemas)
    }

    /// Validate configuration, including every sheet schema
    pub fn validate(&self) -> Result<()> {
        if self.sentinel.trim().is_empty() {
            return Err(Error::configuration("sentinel must not be blank"));
        }
        self.registry().map(|_| ())
    }
}
