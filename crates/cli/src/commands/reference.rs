use rust_decimal::Decimal;
use serde::Serialize;

use carwatch_core::config::AppConfig;
use carwatch_core::errors::ApplicationError;
use carwatch_core::reference::{load_reference_data, suggest_vehicles, Dataset, ReferenceData};

use crate::commands::context::{load_config, runtime};
use crate::commands::{to_json, CommandResult};
use crate::sources::ConfiguredReferenceSource;

#[derive(Debug, Serialize)]
struct VehicleListing<'a> {
    command: &'static str,
    status: &'static str,
    source: String,
    fallback: bool,
    filter: Option<&'a str>,
    vehicles: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct RegionRow<'a> {
    region: &'a str,
    fee: Option<Decimal>,
}

#[derive(Debug, Serialize)]
struct RegionListing<'a> {
    command: &'static str,
    status: &'static str,
    source: String,
    fallback: bool,
    regions: Vec<RegionRow<'a>>,
}

pub fn vehicles(filter: Option<&str>, json: bool) -> CommandResult {
    let result = load().and_then(|(config, data)| {
        let listing = VehicleListing {
            command: "reference",
            status: "ok",
            source: source_label(&config, &data, Dataset::Vehicles),
            fallback: data.fell_back(Dataset::Vehicles),
            filter,
            vehicles: suggest_vehicles(&data.vehicles, filter.unwrap_or_default()),
        };
        if json {
            return to_json(&listing);
        }

        let mut lines =
            vec![format!("{} vehicles (source: {})", listing.vehicles.len(), listing.source)];
        lines.extend(listing.vehicles.iter().map(|name| format!("- {name}")));
        Ok(lines.join("\n"))
    });

    finish(result)
}

pub fn regions(json: bool) -> CommandResult {
    let result = load().and_then(|(config, data)| {
        let listing = RegionListing {
            command: "reference",
            status: "ok",
            source: source_label(&config, &data, Dataset::Regions),
            fallback: data.fell_back(Dataset::Regions),
            regions: data
                .regions
                .regions()
                .map(|entry| RegionRow { region: &entry.label, fee: entry.fee })
                .collect(),
        };
        if json {
            return to_json(&listing);
        }

        let width = listing.regions.iter().map(|row| row.region.chars().count()).max();
        let width = width.unwrap_or(0);
        let mut lines =
            vec![format!("{} regions (source: {})", listing.regions.len(), listing.source)];
        lines.extend(listing.regions.iter().map(|row| {
            let fee = row.fee.map(|fee| fee.to_string()).unwrap_or_else(|| "n/a".to_string());
            format!("- {:<width$}  {fee}", row.region)
        }));
        Ok(lines.join("\n"))
    });

    finish(result)
}

fn load() -> Result<(AppConfig, ReferenceData), ApplicationError> {
    let config = load_config()?;
    let runtime = runtime()?;

    let data = runtime.block_on(async {
        let source = ConfiguredReferenceSource::from_config(&config.reference).map_err(|error| {
            ApplicationError::Runtime(format!("failed to build reference client: {error}"))
        })?;
        Ok::<_, ApplicationError>(load_reference_data(&source).await)
    })?;

    Ok((config, data))
}

fn source_label(config: &AppConfig, data: &ReferenceData, dataset: Dataset) -> String {
    if data.fell_back(dataset) {
        return "built-in list".to_string();
    }
    match dataset {
        Dataset::Vehicles => config.reference.vehicles.clone(),
        Dataset::Regions => config.reference.regions.clone(),
    }
}

fn finish(result: Result<String, ApplicationError>) -> CommandResult {
    match result {
        Ok(output) => CommandResult::rendered(output),
        Err(error) => CommandResult::from_error("reference", &error),
    }
}
