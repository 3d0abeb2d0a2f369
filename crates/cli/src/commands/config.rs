use std::env;
use std::fs;
use std::path::Path;

use carwatch_core::config::{resolve_config_path, AppConfig, LoadOptions, LogFormat};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    for entry in entries(&config) {
        let source = field_source(
            entry.key_path,
            entry.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(entry.key_path, &entry.value, source));
    }

    lines.join("\n")
}

struct ConfigEntry {
    key_path: &'static str,
    value: String,
    env_keys: &'static [&'static str],
}

fn entry(key_path: &'static str, value: String, env_keys: &'static [&'static str]) -> ConfigEntry {
    ConfigEntry { key_path, value, env_keys }
}

fn entries(config: &AppConfig) -> Vec<ConfigEntry> {
    let storage = &config.storage;
    let reference = &config.reference;
    let service = &config.service;
    let display = &config.display;

    vec![
        entry("storage.url", storage.url.clone(), &["CARWATCH_STORAGE_URL"]),
        entry(
            "storage.max_connections",
            storage.max_connections.to_string(),
            &["CARWATCH_STORAGE_MAX_CONNECTIONS"],
        ),
        entry(
            "storage.timeout_secs",
            storage.timeout_secs.to_string(),
            &["CARWATCH_STORAGE_TIMEOUT_SECS"],
        ),
        entry("reference.vehicles", reference.vehicles.clone(), &["CARWATCH_REFERENCE_VEHICLES"]),
        entry("reference.regions", reference.regions.clone(), &["CARWATCH_REFERENCE_REGIONS"]),
        entry(
            "reference.timeout_secs",
            reference.timeout_secs.to_string(),
            &["CARWATCH_REFERENCE_TIMEOUT_SECS"],
        ),
        entry("thresholds.days", config.thresholds.days.to_string(), &["CARWATCH_THRESHOLDS_DAYS"]),
        entry("thresholds.km", config.thresholds.km.to_string(), &["CARWATCH_THRESHOLDS_KM"]),
        entry(
            "service.interval_km",
            service.interval_km.to_string(),
            &["CARWATCH_SERVICE_INTERVAL_KM"],
        ),
        entry(
            "service.interval_months",
            service.interval_months.to_string(),
            &["CARWATCH_SERVICE_INTERVAL_MONTHS"],
        ),
        entry(
            "display.date_format",
            display.date_format.clone(),
            &["CARWATCH_DISPLAY_DATE_FORMAT"],
        ),
        entry(
            "display.thousands_separator",
            format!("{:?}", display.thousands_separator),
            &["CARWATCH_DISPLAY_THOUSANDS_SEPARATOR"],
        ),
        entry(
            "logging.level",
            config.logging.level.clone(),
            &["CARWATCH_LOGGING_LEVEL", "CARWATCH_LOG_LEVEL"],
        ),
        entry(
            "logging.format",
            log_format_name(config.logging.format).to_string(),
            &["CARWATCH_LOGGING_FORMAT", "CARWATCH_LOG_FORMAT"],
        ),
    ]
}

fn log_format_name(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    for env_key in env_keys {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
