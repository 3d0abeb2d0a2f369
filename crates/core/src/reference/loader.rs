use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use super::defaults::{embedded_regions, embedded_vehicles};
use super::{RegionFee, RegionFeeTable};
use crate::errors::ReferenceDataUnavailable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Vehicles,
    Regions,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vehicles => "vehicles",
            Self::Regions => "regions",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where raw reference JSON comes from (a file, an HTTP endpoint, a fixture).
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch(&self, dataset: Dataset) -> Result<String, ReferenceDataUnavailable>;

    fn location(&self, dataset: Dataset) -> String;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceFallback {
    pub dataset: Dataset,
    pub reason: ReferenceDataUnavailable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceData {
    pub vehicles: Vec<String>,
    pub regions: RegionFeeTable,
    pub fallbacks: Vec<ReferenceFallback>,
}

impl ReferenceData {
    pub fn used_fallback(&self) -> bool {
        !self.fallbacks.is_empty()
    }

    pub fn fell_back(&self, dataset: Dataset) -> bool {
        self.fallbacks.iter().any(|fallback| fallback.dataset == dataset)
    }
}

/// Loads both datasets. Each one independently degrades to the embedded
/// defaults on any failure; this function never fails.
pub async fn load_reference_data(source: &dyn ReferenceSource) -> ReferenceData {
    let mut fallbacks = Vec::new();

    let vehicles = match fetch_and_parse(source, Dataset::Vehicles, parse_vehicles).await {
        Ok(vehicles) => vehicles,
        Err(reason) => {
            fallbacks.push(ReferenceFallback { dataset: Dataset::Vehicles, reason });
            embedded_vehicles()
        }
    };

    let regions = match fetch_and_parse(source, Dataset::Regions, parse_regions).await {
        Ok(regions) => regions,
        Err(reason) => {
            fallbacks.push(ReferenceFallback { dataset: Dataset::Regions, reason });
            embedded_regions()
        }
    };

    for fallback in &fallbacks {
        warn!(
            event_name = "reference.load.fallback",
            dataset = fallback.dataset.as_str(),
            location = %source.location(fallback.dataset),
            error = %fallback.reason,
            "reference data unavailable, using embedded defaults"
        );
    }

    ReferenceData { vehicles, regions, fallbacks }
}

async fn fetch_and_parse<T>(
    source: &dyn ReferenceSource,
    dataset: Dataset,
    parse: fn(&str) -> Result<T, ReferenceDataUnavailable>,
) -> Result<T, ReferenceDataUnavailable> {
    let raw = source.fetch(dataset).await?;
    let parsed = parse(&raw)?;
    debug!(
        event_name = "reference.load.ok",
        dataset = dataset.as_str(),
        location = %source.location(dataset),
        "reference data loaded"
    );
    Ok(parsed)
}

/// Parses a JSON array of vehicle names; blank names are dropped.
pub fn parse_vehicles(raw: &str) -> Result<Vec<String>, ReferenceDataUnavailable> {
    let names: Vec<String> = serde_json::from_str(raw).map_err(|error| {
        ReferenceDataUnavailable::Malformed {
            dataset: Dataset::Vehicles,
            message: error.to_string(),
        }
    })?;

    let vehicles: Vec<String> = names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if vehicles.is_empty() {
        return Err(ReferenceDataUnavailable::Empty(Dataset::Vehicles));
    }
    Ok(vehicles)
}

pub fn parse_regions(raw: &str) -> Result<RegionFeeTable, ReferenceDataUnavailable> {
    let records: Vec<RegionFee> = serde_json::from_str(raw).map_err(|error| {
        ReferenceDataUnavailable::Malformed { dataset: Dataset::Regions, message: error.to_string() }
    })?;

    let table = RegionFeeTable::from_records(records);
    if table.is_empty() {
        return Err(ReferenceDataUnavailable::Empty(Dataset::Regions));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use super::{load_reference_data, parse_regions, parse_vehicles, Dataset, ReferenceSource};
    use crate::errors::ReferenceDataUnavailable;

    struct FixtureSource {
        payloads: HashMap<Dataset, Result<String, ReferenceDataUnavailable>>,
    }

    #[async_trait]
    impl ReferenceSource for FixtureSource {
        async fn fetch(&self, dataset: Dataset) -> Result<String, ReferenceDataUnavailable> {
            self.payloads.get(&dataset).cloned().unwrap_or_else(|| {
                Err(ReferenceDataUnavailable::Read {
                    location: dataset.to_string(),
                    message: "missing fixture".to_string(),
                })
            })
        }

        fn location(&self, dataset: Dataset) -> String {
            format!("fixture://{dataset}")
        }
    }

    #[tokio::test]
    async fn loads_published_data_when_available() {
        let source = FixtureSource {
            payloads: HashMap::from([
                (Dataset::Vehicles, Ok(r#"["Fiat Panda", " ", "Audi A3"]"#.to_string())),
                (Dataset::Regions, Ok(r#"[{"region": "Lazio", "fee": 140}]"#.to_string())),
            ]),
        };

        let data = load_reference_data(&source).await;

        assert!(!data.used_fallback());
        assert_eq!(data.vehicles, vec!["Fiat Panda".to_string(), "Audi A3".to_string()]);
        assert_eq!(data.regions.len(), 1);
        assert_eq!(data.regions.lookup("lazio"), Some(Decimal::from(140)));
    }

    #[tokio::test]
    async fn each_dataset_falls_back_independently() {
        let source = FixtureSource {
            payloads: HashMap::from([
                (Dataset::Vehicles, Ok(r#"["Fiat Panda"]"#.to_string())),
                (
                    Dataset::Regions,
                    Err(ReferenceDataUnavailable::HttpStatus {
                        location: "regions.json".to_string(),
                        status: 404,
                    }),
                ),
            ]),
        };

        let data = load_reference_data(&source).await;

        assert!(data.used_fallback());
        assert!(data.fell_back(Dataset::Regions));
        assert!(!data.fell_back(Dataset::Vehicles));
        assert_eq!(data.vehicles.len(), 1);
        assert_eq!(data.regions.len(), 20);
    }

    #[tokio::test]
    async fn malformed_payloads_fall_back_to_embedded_defaults() {
        let source = FixtureSource {
            payloads: HashMap::from([
                (Dataset::Vehicles, Ok("{not json".to_string())),
                (Dataset::Regions, Ok("[]".to_string())),
            ]),
        };

        let data = load_reference_data(&source).await;

        assert_eq!(data.fallbacks.len(), 2);
        assert_eq!(data.vehicles.len(), 20);
        assert_eq!(data.regions.lookup("Veneto"), Some(Decimal::from(140)));
        assert!(matches!(
            data.fallbacks[1].reason,
            ReferenceDataUnavailable::Empty(Dataset::Regions)
        ));
    }

    #[test]
    fn parsers_reject_wrong_shapes() {
        assert!(parse_vehicles(r#"[1, 2]"#).is_err());
        assert!(parse_vehicles("[]").is_err());
        assert!(parse_regions(r#"{"Lazio": 140}"#).is_err());
        assert!(parse_regions(r#"[{"fee": 140}]"#).is_err());
    }
}
