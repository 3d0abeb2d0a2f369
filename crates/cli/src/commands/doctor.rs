use carwatch_core::config::{AppConfig, LoadOptions};
use carwatch_core::reference::{load_reference_data, Dataset, ReferenceData};
use carwatch_db::session_store::THEME_KEY;
use carwatch_db::StateRepository;
use serde::Serialize;

use crate::commands::context::{connect_state_repository, runtime};
use crate::sources::ConfiguredReferenceSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.extend(check_runtime_dependencies(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["state_store", "reference_vehicles", "reference_regions"] {
                checks.push(skipped(name, "skipped because configuration did not load"));
            }
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_runtime_dependencies(config: &AppConfig) -> Vec<DoctorCheck> {
    let runtime = match runtime() {
        Ok(runtime) => runtime,
        Err(error) => {
            let details = error.to_string();
            return vec![
                DoctorCheck { name: "state_store", status: CheckStatus::Fail, details },
                skipped("reference_vehicles", "skipped because the async runtime failed"),
                skipped("reference_regions", "skipped because the async runtime failed"),
            ];
        }
    };

    runtime.block_on(async {
        let mut checks = vec![check_state_store(config).await];

        match ConfiguredReferenceSource::from_config(&config.reference) {
            Ok(source) => {
                let data = load_reference_data(&source).await;
                checks.push(check_reference(config, &data, Dataset::Vehicles));
                checks.push(check_reference(config, &data, Dataset::Regions));
            }
            Err(error) => {
                let details = format!("failed to build reference client: {error}");
                checks.push(DoctorCheck {
                    name: "reference_vehicles",
                    status: CheckStatus::Fail,
                    details: details.clone(),
                });
                checks.push(DoctorCheck {
                    name: "reference_regions",
                    status: CheckStatus::Fail,
                    details,
                });
            }
        }

        checks
    })
}

async fn check_state_store(config: &AppConfig) -> DoctorCheck {
    let result = async {
        let repository =
            connect_state_repository(config).await.map_err(|error| error.to_string())?;
        repository
            .get(THEME_KEY)
            .await
            .map_err(|error| format!("state store is not readable: {error}"))?;
        Ok::<(), String>(())
    }
    .await;

    match result {
        Ok(()) => DoctorCheck {
            name: "state_store",
            status: CheckStatus::Pass,
            details: format!("opened and migrated `{}`", config.storage.url),
        },
        Err(details) => DoctorCheck { name: "state_store", status: CheckStatus::Fail, details },
    }
}

fn check_reference(config: &AppConfig, data: &ReferenceData, dataset: Dataset) -> DoctorCheck {
    let (name, location, count) = match dataset {
        Dataset::Vehicles => {
            ("reference_vehicles", &config.reference.vehicles, data.vehicles.len())
        }
        Dataset::Regions => ("reference_regions", &config.reference.regions, data.regions.len()),
    };

    match data.fallbacks.iter().find(|fallback| fallback.dataset == dataset) {
        None => DoctorCheck {
            name,
            status: CheckStatus::Pass,
            details: format!("{count} entries loaded from `{location}`"),
        },
        Some(fallback) => DoctorCheck {
            name,
            status: CheckStatus::Fail,
            details: format!("{}; the built-in list would be used", fallback.reason),
        },
    }
}

fn skipped(name: &'static str, details: &str) -> DoctorCheck {
    DoctorCheck { name, status: CheckStatus::Skipped, details: details.to_string() }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
