//! End-to-end feed generation.
//!
//! Fetches every registered sheet, builds each sheet's dataset independently,
//! then merges the per-sheet campaign contributions into one list and
//! assembles the dashboard payload. The merge happens once, after every
//! sheet is done, so sequential and concurrent runs produce the same output.

use futures::future::join_all;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::Result;
use crate::app::services::campaign_aggregator::CampaignAggregator;
use crate::app::services::dataset_builder::{BuildStats, build_dataset};
use crate::app::services::schema_registry::SchemaRegistry;
use crate::app::services::serializer::DashboardPayload;
use crate::app::services::sheet_fetcher::{FetchedSheet, SheetFetcher, fetch_or_empty};
use crate::config::Config;
use crate::constants::ALL_CAMPAIGNS;

/// Feed generator over a validated schema registry
#[derive(Debug, Clone)]
pub struct Pipeline {
    registry: SchemaRegistry,
    sentinel: String,
}

/// Payload plus the accounting of the run that produced it
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub payload: DashboardPayload,
    pub stats: PipelineStats,
}

/// Run-level statistics, one [`BuildStats`] per sheet in registry order
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub sheets: Vec<BuildStats>,
    pub campaigns: usize,
    pub elapsed: Duration,
}

impl PipelineStats {
    pub fn rows_seen(&self) -> usize {
        self.sheets.iter().map(|s| s.rows_seen).sum()
    }

    pub fn records_built(&self) -> usize {
        self.sheets.iter().map(|s| s.records_built).sum()
    }

    pub fn rows_rejected(&self) -> usize {
        self.sheets.iter().map(BuildStats::rows_rejected).sum()
    }

    /// Keys of the sheets whose fetch failed
    pub fn degraded_sheets(&self) -> Vec<&str> {
        self.sheets
            .iter()
            .filter(|s| s.fetch_degraded)
            .map(|s| s.key.as_str())
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} records from {} rows across {} sheets ({} rejected, {} degraded), {} campaigns in {:.2?}",
            self.records_built(),
            self.rows_seen(),
            self.sheets.len(),
            self.rows_rejected(),
            self.degraded_sheets().len(),
            self.campaigns,
            self.elapsed
        )
    }
}

impl Pipeline {
    pub fn new(registry: SchemaRegistry, sentinel: impl Into<String>) -> Self {
        Self {
            registry,
            sentinel: sentinel.into(),
        }
    }

    /// Pipeline over the configured sheets and sentinel
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.registry()?, config.sentinel.clone()))
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Fetch sheets one after another, in registry order
    pub async fn run<F: SheetFetcher>(&self, fetcher: &F) -> PipelineOutput {
        let started = Instant::now();
        let mut fetched = Vec::with_capacity(self.registry.len());
        for schema in &self.registry {
            fetched.push(fetch_or_empty(fetcher, schema).await);
        }
        self.assemble(fetched, started)
    }

    /// Fetch every sheet at once and wait for all of them
    pub async fn run_concurrent<F: SheetFetcher>(&self, fetcher: &F) -> PipelineOutput {
        let started = Instant::now();
        let fetches = self
            .registry
            .iter()
            .map(|schema| fetch_or_empty(fetcher, schema));
        let fetched = join_all(fetches).await;
        self.assemble(fetched, started)
    }

    fn assemble(&self, fetched: Vec<FetchedSheet>, started: Instant) -> PipelineOutput {
        let mut aggregator = CampaignAggregator::new(self.sentinel.clone());
        let mut datasets = Vec::with_capacity(self.registry.len());
        let mut sheets = Vec::with_capacity(self.registry.len());

        for (schema, sheet) in self.registry.iter().zip(fetched) {
            let mut outcome = build_dataset(schema, &sheet.rows);
            outcome.stats.fetch_degraded = sheet.degraded;
            if sheet.degraded {
                warn!("{}", outcome.stats.summary());
            }

            aggregator.extend(&outcome.campaigns);
            datasets.push((outcome.key, outcome.dataset));
            sheets.push(outcome.stats);
        }

        let campaigns = aggregator.finish();
        let stats = PipelineStats {
            sheets,
            campaigns: campaigns.names().len(),
            elapsed: started.elapsed(),
        };
        info!("{}", stats.summary());

        PipelineOutput {
            payload: DashboardPayload::new(datasets, campaigns),
            stats,
        }
    }
}

impl Default for Pipeline {
    /// The three built-in sheets with the default sentinel
    fn default() -> Self {
        Self::new(SchemaRegistry::builtin(), ALL_CAMPAIGNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::app::models::RawRow;
    use crate::app::services::schema_registry::{CellRange, SchemaKind, SheetSchema};
    use crate::app::services::sheet_fetcher::MemoryFetcher;
    use crate::constants::{gender_sheet, group_sheet, performance_sheet};

    fn rows(cells: &[&[&str]]) -> Vec<RawRow> {
        cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn sample_fetcher() -> MemoryFetcher {
        MemoryFetcher::new()
            .with_sheet(
                group_sheet::NAME,
                rows(&[
                    &["header"],
                    &["2025/10/09", "CampaignA", "Group1", "¥100", "1000", "10", "", "3"],
                    &["", "CampaignB", "Group2", "50", "500", "5", "", "1"],
                ]),
            )
            .with_sheet(
                performance_sheet::NAME,
                rows(&[
                    &["header"],
                    &["2025/10/09", "Beta", "", "1", "1", "1", "", "0"],
                    &["2025/10/10", "Alpha", "", "2", "2", "2", "", "1"],
                ]),
            )
            .with_sheet(
                gender_sheet::NAME,
                rows(&[
                    &["header"],
                    &["2025/10/09", "Beta", "", "1", "1", "1", "", "0", "male"],
                    &["2025/10/09", "", "", "1", "1", "1", "", "0", "female"],
                    &["2025/10/09", "Gamma", "", "1", "1", "1", "", "0", "unknown"],
                    &["2025/10/09", "Delta", "", "1", "1", "1", "", "0", ""],
                ]),
            )
    }

    /// Fails for one sheet and serves the rest from memory
    struct PartialFetcher {
        inner: MemoryFetcher,
        failing: &'static str,
    }

    impl SheetFetcher for PartialFetcher {
        async fn fetch(&self, sheet_name: &str, range: &CellRange) -> Result<Vec<RawRow>> {
            if sheet_name == self.failing {
                return Err(Error::sheet_fetch(sheet_name, "quota exceeded"));
            }
            self.inner.fetch(sheet_name, range).await
        }
    }

    #[tokio::test]
    async fn test_run_builds_every_dataset_and_campaigns() {
        let output = Pipeline::default().run(&sample_fetcher()).await;
        let payload = &output.payload;

        let keys: Vec<&str> = payload.datasets().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["group", "performance", "gender"]);

        assert_eq!(payload.dataset("group").map(Vec::len), Some(1));
        assert_eq!(payload.dataset("performance").map(Vec::len), Some(2));
        assert_eq!(payload.dataset("gender").map(Vec::len), Some(3));
        assert_eq!(
            payload.campaigns().as_slice(),
            ["all campaigns", "Alpha", "Beta", "CampaignA", "Gamma"]
        );

        assert_eq!(output.stats.records_built(), 6);
        assert_eq!(output.stats.rows_rejected(), 2);
        assert_eq!(output.stats.campaigns, 4);
        assert!(output.stats.degraded_sheets().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_run_matches_sequential() {
        let pipeline = Pipeline::default();
        let fetcher = sample_fetcher();

        let sequential = pipeline.run(&fetcher).await;
        let concurrent = pipeline.run_concurrent(&fetcher).await;

        assert_eq!(sequential.payload, concurrent.payload);
        assert_eq!(sequential.stats.sheets, concurrent.stats.sheets);
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_one_sheet() {
        let fetcher = PartialFetcher {
            inner: sample_fetcher(),
            failing: performance_sheet::NAME,
        };

        let output = Pipeline::default().run_concurrent(&fetcher).await;

        assert_eq!(output.payload.dataset("performance").map(Vec::len), Some(0));
        assert_eq!(output.payload.dataset("group").map(Vec::len), Some(1));
        assert_eq!(output.stats.degraded_sheets(), ["performance"]);
        assert!(!output.payload.campaigns().contains("Alpha"));
        assert!(output.payload.campaigns().contains("Gamma"));
    }

    #[tokio::test]
    async fn test_nothing_fetched_gives_sentinel_only() {
        let output = Pipeline::default().run(&MemoryFetcher::new()).await;

        assert_eq!(output.payload.record_count(), 0);
        assert_eq!(output.payload.campaigns().as_slice(), ["all campaigns"]);
        assert_eq!(output.stats.degraded_sheets().len(), 3);
    }

    #[tokio::test]
    async fn test_custom_registry_and_sentinel() {
        let mut schema = SheetSchema::builtin(SchemaKind::Performance);
        schema.key = "daily".to_string();
        let registry = SchemaRegistry::new(vec![schema]).unwrap();
        let pipeline = Pipeline::new(registry, "すべてのキャンペーン");

        let output = pipeline.run(&sample_fetcher()).await;
        assert_eq!(output.payload.datasets().len(), 1);
        assert!(output.payload.dataset("daily").is_some());
        assert_eq!(output.payload.campaigns().sentinel(), "すべてのキャンペーン");
    }

    #[test]
    fn test_from_config_uses_configured_sentinel() {
        let config = Config {
            sentinel: "すべてのキャンペーン".to_string(),
            ..Config::default()
        };
        let pipeline = Pipeline::from_config(&config).unwrap();
        assert_eq!(pipeline.sentinel(), "すべてのキャンペーン");
        assert_eq!(pipeline.registry().len(), 3);
    }
}
