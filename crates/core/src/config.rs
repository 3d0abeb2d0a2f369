use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deadlines::{DisplayFormat, ServiceInterval};
use crate::domain::thresholds::{Thresholds, MIN_THRESHOLD_DAYS, MIN_THRESHOLD_KM};
use crate::temporal::is_date_pattern_usable;
use crate::validation::MAX_DISTANCE_KM;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub reference: ReferenceConfig,
    pub thresholds: ThresholdsConfig,
    pub service: ServiceConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

/// Locations of the reference datasets: a file path or an `http(s)://` URL.
#[derive(Clone, Debug)]
pub struct ReferenceConfig {
    pub vehicles: String,
    pub regions: String,
    pub timeout_secs: u64,
}

/// Initial thresholds, used until the user saves their own.
#[derive(Clone, Debug)]
pub struct ThresholdsConfig {
    pub days: i64,
    pub km: i64,
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub interval_km: i64,
    pub interval_months: i32,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    pub date_format: String,
    pub thousands_separator: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub storage_url: Option<String>,
    pub log_level: Option<String>,
    pub reference_vehicles: Option<String>,
    pub reference_regions: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["carwatch.toml", "config/carwatch.toml"];

impl Default for AppConfig {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        let interval = ServiceInterval::default();
        let display = DisplayFormat::default();

        Self {
            storage: StorageConfig {
                url: "sqlite://carwatch.db".to_string(),
                max_connections: 1,
                timeout_secs: 5,
            },
            reference: ReferenceConfig {
                vehicles: "assets/data/vehicles.json".to_string(),
                regions: "assets/data/regions.json".to_string(),
                timeout_secs: 10,
            },
            thresholds: ThresholdsConfig { days: thresholds.days, km: thresholds.km },
            service: ServiceConfig {
                interval_km: interval.distance_km,
                interval_months: interval.months,
            },
            display: DisplayConfig {
                date_format: display.date_format,
                thousands_separator: display.thousands_separator,
            },
            logging: LoggingConfig { level: "warn".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_CANDIDATES[0]));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn initial_thresholds(&self) -> Thresholds {
        Thresholds::new(self.thresholds.days, self.thresholds.km)
    }

    pub fn service_interval(&self) -> ServiceInterval {
        ServiceInterval {
            distance_km: self.service.interval_km,
            months: self.service.interval_months,
        }
    }

    pub fn display_format(&self) -> DisplayFormat {
        DisplayFormat {
            date_format: self.display.date_format.clone(),
            thousands_separator: self.display.thousands_separator.clone(),
        }
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(storage) = patch.storage {
            if let Some(url) = storage.url {
                self.storage.url = url;
            }
            if let Some(max_connections) = storage.max_connections {
                self.storage.max_connections = max_connections;
            }
            if let Some(timeout_secs) = storage.timeout_secs {
                self.storage.timeout_secs = timeout_secs;
            }
        }

        if let Some(reference) = patch.reference {
            if let Some(vehicles) = reference.vehicles {
                self.reference.vehicles = vehicles;
            }
            if let Some(regions) = reference.regions {
                self.reference.regions = regions;
            }
            if let Some(timeout_secs) = reference.timeout_secs {
                self.reference.timeout_secs = timeout_secs;
            }
        }

        if let Some(thresholds) = patch.thresholds {
            if let Some(days) = thresholds.days {
                self.thresholds.days = days;
            }
            if let Some(km) = thresholds.km {
                self.thresholds.km = km;
            }
        }

        if let Some(service) = patch.service {
            if let Some(interval_km) = service.interval_km {
                self.service.interval_km = interval_km;
            }
            if let Some(interval_months) = service.interval_months {
                self.service.interval_months = interval_months;
            }
        }

        if let Some(display) = patch.display {
            if let Some(date_format) = display.date_format {
                self.display.date_format = date_format;
            }
            if let Some(thousands_separator) = display.thousands_separator {
                self.display.thousands_separator = thousands_separator;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("CARWATCH_STORAGE_URL") {
            self.storage.url = value;
        }
        if let Some(value) = read_env("CARWATCH_STORAGE_MAX_CONNECTIONS") {
            self.storage.max_connections = parse_u32("CARWATCH_STORAGE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = read_env("CARWATCH_STORAGE_TIMEOUT_SECS") {
            self.storage.timeout_secs = parse_u64("CARWATCH_STORAGE_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("CARWATCH_REFERENCE_VEHICLES") {
            self.reference.vehicles = value;
        }
        if let Some(value) = read_env("CARWATCH_REFERENCE_REGIONS") {
            self.reference.regions = value;
        }
        if let Some(value) = read_env("CARWATCH_REFERENCE_TIMEOUT_SECS") {
            self.reference.timeout_secs = parse_u64("CARWATCH_REFERENCE_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("CARWATCH_THRESHOLDS_DAYS") {
            self.thresholds.days = parse_i64("CARWATCH_THRESHOLDS_DAYS", &value)?;
        }
        if let Some(value) = read_env("CARWATCH_THRESHOLDS_KM") {
            self.thresholds.km = parse_i64("CARWATCH_THRESHOLDS_KM", &value)?;
        }

        if let Some(value) = read_env("CARWATCH_SERVICE_INTERVAL_KM") {
            self.service.interval_km = parse_i64("CARWATCH_SERVICE_INTERVAL_KM", &value)?;
        }
        if let Some(value) = read_env("CARWATCH_SERVICE_INTERVAL_MONTHS") {
            self.service.interval_months = parse_i32("CARWATCH_SERVICE_INTERVAL_MONTHS", &value)?;
        }

        if let Some(value) = read_env("CARWATCH_DISPLAY_DATE_FORMAT") {
            self.display.date_format = value;
        }
        if let Ok(value) = env::var("CARWATCH_DISPLAY_THOUSANDS_SEPARATOR") {
            self.display.thousands_separator = value;
        }

        let log_level =
            read_env("CARWATCH_LOGGING_LEVEL").or_else(|| read_env("CARWATCH_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("CARWATCH_LOGGING_FORMAT").or_else(|| read_env("CARWATCH_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(storage_url) = overrides.storage_url {
            self.storage.url = storage_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(vehicles) = overrides.reference_vehicles {
            self.reference.vehicles = vehicles;
        }
        if let Some(regions) = overrides.reference_regions {
            self.reference.regions = regions;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_storage(&self.storage)?;
        validate_reference(&self.reference)?;
        validate_thresholds(&self.thresholds)?;
        validate_service(&self.service)?;
        validate_display(&self.display)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    CONFIG_FILE_CANDIDATES.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_storage(storage: &StorageConfig) -> Result<(), ConfigError> {
    let url = storage.url.trim();
    let sqlite_url =
        url.starts_with("sqlite://") || url.starts_with("sqlite::") || url == ":memory:";
    if !sqlite_url {
        return Err(ConfigError::Validation(
            "storage.url must be a sqlite URL (`sqlite://...`, `sqlite::...`, or `:memory:`)"
                .to_string(),
        ));
    }

    if storage.max_connections == 0 {
        return Err(ConfigError::Validation(
            "storage.max_connections must be greater than zero".to_string(),
        ));
    }

    if storage.timeout_secs == 0 || storage.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "storage.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_reference(reference: &ReferenceConfig) -> Result<(), ConfigError> {
    if reference.vehicles.trim().is_empty() || reference.regions.trim().is_empty() {
        return Err(ConfigError::Validation(
            "reference.vehicles and reference.regions must name a file path or URL".to_string(),
        ));
    }

    if reference.timeout_secs == 0 || reference.timeout_secs > 120 {
        return Err(ConfigError::Validation(
            "reference.timeout_secs must be in range 1..=120".to_string(),
        ));
    }

    Ok(())
}

fn validate_thresholds(thresholds: &ThresholdsConfig) -> Result<(), ConfigError> {
    if thresholds.days < MIN_THRESHOLD_DAYS {
        return Err(ConfigError::Validation(format!(
            "thresholds.days must be at least {MIN_THRESHOLD_DAYS}"
        )));
    }
    if thresholds.km < MIN_THRESHOLD_KM {
        return Err(ConfigError::Validation(format!(
            "thresholds.km must be at least {MIN_THRESHOLD_KM}"
        )));
    }
    Ok(())
}

fn validate_service(service: &ServiceConfig) -> Result<(), ConfigError> {
    if service.interval_km <= 0 || service.interval_km > MAX_DISTANCE_KM {
        return Err(ConfigError::Validation(format!(
            "service.interval_km must be in range 1..={MAX_DISTANCE_KM}"
        )));
    }
    if service.interval_months <= 0 || service.interval_months > 120 {
        return Err(ConfigError::Validation(
            "service.interval_months must be in range 1..=120".to_string(),
        ));
    }
    Ok(())
}

fn validate_display(display: &DisplayConfig) -> Result<(), ConfigError> {
    if !is_date_pattern_usable(&display.date_format) {
        return Err(ConfigError::Validation(format!(
            "display.date_format `{}` is not a usable date pattern (e.g. `%d/%m/%Y`)",
            display.date_format
        )));
    }
    if display.thousands_separator.chars().any(|ch| ch.is_ascii_digit()) {
        return Err(ConfigError::Validation(
            "display.thousands_separator must not contain digits".to_string(),
        ));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse::<u32>().map_err(|_| invalid_override(key, value))
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| invalid_override(key, value))
}

fn parse_i32(key: &str, value: &str) -> Result<i32, ConfigError> {
    value.trim().parse::<i32>().map_err(|_| invalid_override(key, value))
}

fn parse_i64(key: &str, value: &str) -> Result<i64, ConfigError> {
    value.trim().parse::<i64>().map_err(|_| invalid_override(key, value))
}

fn invalid_override(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvOverride { key: key.to_string(), value: value.to_string() }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    storage: Option<StoragePatch>,
    reference: Option<ReferencePatch>,
    thresholds: Option<ThresholdsPatch>,
    service: Option<ServicePatch>,
    display: Option<DisplayPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    url: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ReferencePatch {
    vehicles: Option<String>,
    regions: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ThresholdsPatch {
    days: Option<i64>,
    km: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct ServicePatch {
    interval_km: Option<i64>,
    interval_months: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct DisplayPatch {
    date_format: Option<String>,
    thousands_separator: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_match_the_documented_values() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.thresholds.days == 30, "default threshold days should be 30")?;
        ensure(config.thresholds.km == 1000, "default threshold km should be 1000")?;
        ensure(config.service.interval_km == 15_000, "default interval should be 15000 km")?;
        ensure(config.service.interval_months == 12, "default interval should be 12 months")?;
        ensure(config.display.date_format == "%Y-%m-%d", "default date format should be ISO")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )?;
        Ok(())
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_CARWATCH_REGIONS", "https://example.test/regions.json");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("carwatch.toml");
            fs::write(
                &path,
                r#"
[reference]
regions = "${TEST_CARWATCH_REGIONS}"

[display]
date_format = "%d/%m/%Y"
thousands_separator = "."
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.reference.regions == "https://example.test/regions.json",
                "regions location should be interpolated from the environment",
            )?;
            ensure(config.display_format().thousands_separator == ".", "separator from file")?;
            Ok(())
        })();

        clear_vars(&["TEST_CARWATCH_REGIONS"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("CARWATCH_STORAGE_URL", "sqlite://from-env.db");
        env::set_var("CARWATCH_THRESHOLDS_DAYS", "14");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("carwatch.toml");
            fs::write(
                &path,
                r#"
[storage]
url = "sqlite://from-file.db"

[thresholds]
days = 45
km = 500

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    storage_url: Some("sqlite://from-override.db".to_string()),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.storage.url == "sqlite://from-override.db",
                "override storage url should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.thresholds.days == 14, "env threshold should win over file")?;
            ensure(config.thresholds.km == 500, "file threshold should win over default")?;
            ensure(
                config.initial_thresholds().km == 500,
                "initial thresholds should reflect the configured values",
            )?;
            Ok(())
        })();

        clear_vars(&["CARWATCH_STORAGE_URL", "CARWATCH_THRESHOLDS_DAYS"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("CARWATCH_DISPLAY_DATE_FORMAT", "%H:%M");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("display.date_format")
            );
            ensure(has_message, "validation failure should mention display.date_format")
        })();

        clear_vars(&["CARWATCH_DISPLAY_DATE_FORMAT"]);
        result
    }

    #[test]
    fn invalid_numeric_env_override_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("CARWATCH_SERVICE_INTERVAL_KM", "fifteen thousand");

        let result = (|| -> Result<(), String> {
            let error = AppConfig::load(LoadOptions::default())
                .err()
                .ok_or_else(|| "expected env override failure".to_string())?;
            ensure(
                matches!(
                    error,
                    ConfigError::InvalidEnvOverride { ref key, .. }
                        if key == "CARWATCH_SERVICE_INTERVAL_KM"
                ),
                "error should name the offending variable",
            )
        })();

        clear_vars(&["CARWATCH_SERVICE_INTERVAL_KM"]);
        result
    }

    #[test]
    fn missing_required_file_is_an_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let missing = dir.path().join("absent.toml");
        let result = AppConfig::load(LoadOptions {
            config_path: Some(missing),
            require_file: true,
            ..LoadOptions::default()
        });

        ensure(
            matches!(result, Err(ConfigError::MissingConfigFile(_))),
            "missing required config file should fail",
        )
    }

    #[test]
    fn oversized_service_interval_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("CARWATCH_SERVICE_INTERVAL_KM", "9223372036854775807");

        let result = (|| -> Result<(), String> {
            let error = AppConfig::load(LoadOptions::default())
                .err()
                .ok_or_else(|| "expected validation failure".to_string())?;
            ensure(
                matches!(
                    error,
                    ConfigError::Validation(ref message) if message.contains("service.interval_km")
                ),
                "validation failure should mention service.interval_km",
            )
        })();

        clear_vars(&["CARWATCH_SERVICE_INTERVAL_KM"]);
        result
    }
}
