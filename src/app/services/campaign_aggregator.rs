//! Campaign list aggregation
//!
//! Collects campaign names from every sheet into the list the dashboard
//! offers as a filter: unique, sorted by codepoint, blank names dropped,
//! and headed by the "all campaigns" sentinel.

use crate::app::models::CampaignList;
use crate::constants::ALL_CAMPAIGNS;
use std::collections::BTreeSet;
use tracing::debug;

/// Accumulates campaign names across sheets
///
/// Feed it each sheet's contribution once that sheet is complete, then call
/// [`CampaignAggregator::finish`]. The result does not depend on the order
/// of the contributions.
#[derive(Debug, Clone)]
pub struct CampaignAggregator {
    sentinel: String,
    names: BTreeSet<String>,
}

impl CampaignAggregator {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
            names: BTreeSet::new(),
        }
    }

    /// Add one name; blank names are ignored
    pub fn add(&mut self, name: &str) {
        if !name.trim().is_empty() && !self.names.contains(name) {
            self.names.insert(name.to_string());
        }
    }

    /// Add a sheet's contribution
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add(name.as_ref());
        }
    }

    /// Number of distinct real campaign names so far
    pub fn distinct(&self) -> usize {
        self.names.len()
    }

    /// Sentinel first, then every distinct name in ascending order
    pub fn finish(self) -> CampaignList {
        debug!("Aggregated {} distinct campaigns", self.names.len());
        let entries = std::iter::once(self.sentinel)
            .chain(self.names)
            .collect();
        CampaignList::from_entries(entries)
    }
}

impl Default for CampaignAggregator {
    fn default() -> Self {
        Self::new(ALL_CAMPAIGNS)
    }
}

/// Aggregate `names` in one step with the default sentinel
pub fn aggregate_campaigns<I, S>(names: I) -> CampaignList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = CampaignAggregator::default();
    aggregator.extend(names);
    aggregator.finish()
}
