//! Dashboard payload serialization
//!
//! The payload is one JSON object: a property per schema key holding that
//! sheet's records in sheet order, followed by `campaigns`, the aggregated
//! campaign list with the sentinel first.

use std::fmt;
use std::io::Write;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::app::models::{CampaignList, Dataset};
use crate::constants::CAMPAIGNS_KEY;
use crate::{Error, Result};

/// Everything the dashboard consumes
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPayload {
    datasets: Vec<(String, Dataset)>,
    campaigns: CampaignList,
}

impl DashboardPayload {
    /// Datasets keep the given order, which is the registry order
    pub fn new(datasets: Vec<(String, Dataset)>, campaigns: CampaignList) -> Self {
        Self {
            datasets,
            campaigns,
        }
    }

    pub fn datasets(&self) -> &[(String, Dataset)] {
        &self.datasets
    }

    pub fn dataset(&self, key: &str) -> Option<&Dataset> {
        self.datasets
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, dataset)| dataset)
    }

    pub fn campaigns(&self) -> &CampaignList {
        &self.campaigns
    }

    pub fn record_count(&self) -> usize {
        self.datasets.iter().map(|(_, dataset)| dataset.len()).sum()
    }

    /// Render the whole payload
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        render(self, pretty, "dashboard payload")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::serialization("Failed to decode dashboard payload", e))
    }

    /// Render only the datasets object, keyed by schema key
    pub fn datasets_json(&self, pretty: bool) -> Result<String> {
        render(&DatasetsView(&self.datasets), pretty, "datasets")
    }

    /// Render only the campaign array
    pub fn campaigns_json(&self, pretty: bool) -> Result<String> {
        render(&self.campaigns, pretty, "campaign list")
    }

    /// Write the payload followed by a newline
    pub fn write_to<W: Write>(&self, mut writer: W, pretty: bool) -> Result<()> {
        let json = self.to_json(pretty)?;
        writer
            .write_all(json.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush())
            .map_err(|e| Error::io("Failed to write dashboard payload", e))
    }
}

fn render<T: Serialize + ?Sized>(value: &T, pretty: bool, what: &str) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| Error::serialization(format!("Failed to encode {what}"), e))
}

struct DatasetsView<'a>(&'a [(String, Dataset)]);

impl Serialize for DatasetsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, dataset) in self.0 {
            map.serialize_entry(key, dataset)?;
        }
        map.end()
    }
}

impl Serialize for DashboardPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.datasets.len() + 1))?;
        for (key, dataset) in &self.datasets {
            map.serialize_entry(key, dataset)?;
        }
        map.serialize_entry(CAMPAIGNS_KEY, &self.campaigns)?;
        map.end()
    }
}

struct PayloadVisitor;

impl<'de> Visitor<'de> for PayloadVisitor {
    type Value = DashboardPayload;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of datasets and a campaigns array")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut datasets: Vec<(String, Dataset)> = Vec::new();
        let mut campaigns = None;

        while let Some(key) = access.next_key::<String>()? {
            if key == CAMPAIGNS_KEY {
                if campaigns.is_some() {
                    return Err(de::Error::duplicate_field(CAMPAIGNS_KEY));
                }
                campaigns = Some(access.next_value::<CampaignList>()?);
            } else if datasets.iter().any(|(k, _)| *k == key) {
                return Err(de::Error::custom(format!("duplicate dataset `{key}`")));
            } else {
                let dataset = access.next_value::<Dataset>()?;
                datasets.push((key, dataset));
            }
        }

        let campaigns = campaigns.ok_or_else(|| de::Error::missing_field(CAMPAIGNS_KEY))?;
        Ok(DashboardPayload::new(datasets, campaigns))
    }
}

impl<'de> Deserialize<'de> for DashboardPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PayloadVisitor)
    }
}
