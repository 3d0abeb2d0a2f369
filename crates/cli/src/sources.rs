use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;

use carwatch_core::config::ReferenceConfig;
use carwatch_core::errors::ReferenceDataUnavailable;
use carwatch_core::reference::{Dataset, ReferenceSource};

/// Reads each dataset from the location configured for it: `http(s)://`
/// locations are fetched, anything else is read as a local file.
pub struct ConfiguredReferenceSource {
    vehicles: String,
    regions: String,
    client: Client,
}

impl ConfiguredReferenceSource {
    pub fn from_config(config: &ReferenceConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            vehicles: config.vehicles.trim().to_string(),
            regions: config.regions.trim().to_string(),
            client,
        })
    }
}

#[async_trait]
impl ReferenceSource for ConfiguredReferenceSource {
    async fn fetch(&self, dataset: Dataset) -> Result<String, ReferenceDataUnavailable> {
        let location = self.location(dataset);
        if is_remote(&location) {
            fetch_remote(&self.client, &location).await
        } else {
            read_local(&location).await
        }
    }

    fn location(&self, dataset: Dataset) -> String {
        match dataset {
            Dataset::Vehicles => self.vehicles.clone(),
            Dataset::Regions => self.regions.clone(),
        }
    }
}

pub fn is_remote(location: &str) -> bool {
    let lowered = location.trim_start().to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

async fn read_local(path: &str) -> Result<String, ReferenceDataUnavailable> {
    tokio::fs::read_to_string(path).await.map_err(|error| ReferenceDataUnavailable::Read {
        location: path.to_string(),
        message: error.to_string(),
    })
}

async fn fetch_remote(client: &Client, url: &str) -> Result<String, ReferenceDataUnavailable> {
    let request_error = |error: reqwest::Error| ReferenceDataUnavailable::Request {
        location: url.to_string(),
        message: error.to_string(),
    };

    let response =
        client.get(url).header(CACHE_CONTROL, "no-store").send().await.map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReferenceDataUnavailable::HttpStatus {
            location: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(request_error)
}
