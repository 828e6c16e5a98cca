//! Command implementations for the dashboard feed CLI
//!
//! This module contains the command execution logic, logging setup and
//! summary reporting for the CLI interface.

use crate::app::services::sheet_fetcher::CsvDirectoryFetcher;
use crate::cli::args::{Args, Commands, ExportArgs, SchemasArgs};
use crate::config::Config;
use crate::constants::LOG_TARGET;
use crate::pipeline::{Pipeline, PipelineOutput, PipelineStats};
use anyhow::{Context, Result};
use colored::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info, warn};

/// Dispatch to the subcommand handler
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Export(export_args)) => run_export(export_args).await,
        Some(Commands::Schemas(schemas_args)) => run_schemas(schemas_args),
        None => Ok(()),
    }
}

/// Build the payload from a directory of sheet exports
///
/// 1. Set up logging and load configuration
/// 2. Fetch and build every configured sheet
/// 3. Write the payload to the output file or stdout
/// 4. Print the run summary
pub async fn run_export(args: ExportArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet);
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(args.config_file.as_deref())?;
    let config = apply_cli_overrides(config, &args);
    let pipeline = Pipeline::from_config(&config)?;

    let fetcher = CsvDirectoryFetcher::new(&args.input_path);
    report_missing_exports(&pipeline, &fetcher)?;

    info!(
        "Exporting {} sheets from {}",
        pipeline.registry().len(),
        args.input_path.display()
    );
    let output = if config.fetch.concurrent {
        pipeline.run_concurrent(&fetcher).await
    } else {
        pipeline.run(&fetcher).await
    };

    write_payload(&output, args.output_path.as_deref(), config.output.pretty)?;

    if args.show_summary() {
        print_summary(&output.stats, args.output_path.as_deref());
    }
    Ok(())
}

/// Print the validated sheet schemas as JSON
pub fn run_schemas(args: SchemasArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false);

    let config = load_configuration(args.config_file.as_deref())?;
    config.validate()?;
    let registry = config.registry()?;

    let schemas: Vec<_> = registry.iter().collect();
    let json = serde_json::to_string_pretty(&schemas).context("Failed to render schemas")?;
    println!("{json}");

    eprintln!(
        "{} {} (sentinel: {})",
        "Schemas valid:".bright_green().bold(),
        registry.len().to_string().bright_white().bold(),
        config.sentinel.bright_white()
    );
    Ok(())
}

/// Set up structured logging to stderr
///
/// `RUST_LOG` takes precedence over the level derived from the flags.
pub fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{LOG_TARGET}={log_level}")));

    let result = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Defaults overlaid by the explicit or default config file
pub fn load_configuration(config_file: Option<&Path>) -> Result<Config> {
    let config = Config::load_layered(config_file).context("Failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Flags only ever switch options on
pub fn apply_cli_overrides(mut config: Config, args: &ExportArgs) -> Config {
    if args.pretty {
        config = config.with_pretty_output();
    }
    if args.concurrent {
        config = config.with_concurrent_fetch();
    }
    config
}

fn report_missing_exports(pipeline: &Pipeline, fetcher: &CsvDirectoryFetcher) -> Result<()> {
    let available = fetcher.available_sheets()?;
    for schema in pipeline.registry() {
        if !available.iter().any(|name| *name == schema.name) {
            warn!(
                "No export for sheet '{}' at {}",
                schema.name,
                fetcher.export_path(&schema.name).display()
            );
        }
    }
    Ok(())
}

fn write_payload(output: &PipelineOutput, path: Option<&Path>, pretty: bool) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            output.payload.write_to(BufWriter::new(file), pretty)?;
            info!("Wrote payload to {}", path.display());
        }
        None => {
            output.payload.write_to(std::io::stdout().lock(), pretty)?;
        }
    }
    Ok(())
}

fn print_summary(stats: &PipelineStats, output_path: Option<&Path>) {
    eprintln!("\n{}", "Export Summary".bright_green().bold());
    eprintln!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.elapsed.as_millis().to_string().bright_white()
    );
    for sheet in &stats.sheets {
        if sheet.fetch_degraded {
            eprintln!(
                "  {} {}",
                format!("{}:", sheet.key).bright_red(),
                "fetch failed, empty dataset".bright_red().bold()
            );
        } else {
            eprintln!(
                "  {} {} records ({} rejected)",
                format!("{}:", sheet.key).bright_cyan(),
                sheet.records_built.to_string().bright_white().bold(),
                sheet.rows_rejected()
            );
        }
    }
    eprintln!(
        "  {} {}",
        "Campaigns:".bright_cyan(),
        stats.campaigns.to_string().bright_white().bold()
    );
    if let Some(path) = output_path {
        eprintln!(
            "  {} {}",
            "Output:".bright_cyan(),
            path.display().to_string().bright_white()
        );
    }
}
