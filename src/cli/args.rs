//! Command-line argument definitions for the dashboard feed generator
//!
//! This module defines the CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the dashboard feed generator
///
/// Reads advertising report sheets exported as CSV and writes the JSON feed
/// consumed by the campaign dashboard.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ad-dashboard-feed",
    version,
    about = "Turn advertising report sheets into the campaign dashboard JSON feed",
    long_about = "Reads the ad group, performance and gender report sheets (exported as CSV, \
                  one file per sheet), normalizes tolerant currency and date cells into typed \
                  records, aggregates the campaign list and writes one JSON payload for the \
                  dashboard."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Build the dashboard payload from a directory of sheet exports
    Export(ExportArgs),
    /// Print the validated sheet schemas
    Schemas(SchemasArgs),
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Directory holding one `<sheet name>.csv` export per sheet
    #[arg(
        short = 'i',
        long = "input",
        value_name = "DIR",
        help = "Directory of per-sheet CSV exports"
    )]
    pub input_path: PathBuf,

    /// File to write the JSON payload to
    ///
    /// If not specified, the payload is written to stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file for the JSON payload (default: stdout)"
    )]
    pub output_path: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// config.json under the user config directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Indent the JSON payload
    #[arg(long = "pretty", help = "Pretty-print the JSON payload")]
    pub pretty: bool,

    /// Read all sheets at once
    #[arg(long = "concurrent", help = "Fetch all sheets concurrently")]
    pub concurrent: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the schemas command
#[derive(Debug, Clone, Parser)]
pub struct SchemasArgs {
    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl ExportArgs {
    /// Validate the export command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input_path.display()
            )));
        }

        if !self.input_path.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is not a directory: {}",
                self.input_path.display()
            )));
        }

        if let Some(parent) = self.output_path.as_deref().and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::configuration(format!(
                    "Output file directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Print the run summary (not in quiet mode)
    pub fn show_summary(&self) -> bool {
        !self.quiet
    }
}

impl SchemasArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
