use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::validation::parse_form_integer;

pub const DEFAULT_THRESHOLD_DAYS: i64 = 30;
pub const MIN_THRESHOLD_DAYS: i64 = 1;
pub const DEFAULT_THRESHOLD_KM: i64 = 1000;
pub const MIN_THRESHOLD_KM: i64 = 100;

/// Warning thresholds. A deadline turns `Warning` once the remaining days (or
/// remaining distance, for the service item) drop to or below these values.
///
/// Serialized as `{thresholdDays, thresholdKm}`. Each key is read on its own:
/// a missing or non-numeric value takes the default without touching the
/// other one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(rename = "thresholdDays", default = "default_days", deserialize_with = "stored_days")]
    pub days: i64,
    #[serde(rename = "thresholdKm", default = "default_km", deserialize_with = "stored_km")]
    pub km: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { days: DEFAULT_THRESHOLD_DAYS, km: DEFAULT_THRESHOLD_KM }
    }
}

impl Thresholds {
    pub fn new(days: i64, km: i64) -> Self {
        Self { days, km }.sanitized()
    }

    /// Blank, zero or unparsable input falls back to the default, then the
    /// value is raised to the minimum.
    pub fn with_days_input(self, raw: &str) -> Self {
        let days = parse_form_integer(raw).unwrap_or(0);
        Self { days: sanitize(days, DEFAULT_THRESHOLD_DAYS, MIN_THRESHOLD_DAYS), ..self }
    }

    pub fn with_km_input(self, raw: &str) -> Self {
        let km = parse_form_integer(raw).unwrap_or(0);
        Self { km: sanitize(km, DEFAULT_THRESHOLD_KM, MIN_THRESHOLD_KM), ..self }
    }

    pub fn sanitized(self) -> Self {
        Self {
            days: sanitize(self.days, DEFAULT_THRESHOLD_DAYS, MIN_THRESHOLD_DAYS),
            km: sanitize(self.km, DEFAULT_THRESHOLD_KM, MIN_THRESHOLD_KM),
        }
    }
}

fn sanitize(value: i64, default: i64, minimum: i64) -> i64 {
    let value = if value == 0 { default } else { value };
    value.max(minimum)
}

fn default_days() -> i64 {
    DEFAULT_THRESHOLD_DAYS
}

fn default_km() -> i64 {
    DEFAULT_THRESHOLD_KM
}

fn stored_days<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(stored_number(Option::<Value>::deserialize(deserializer)?).unwrap_or(DEFAULT_THRESHOLD_DAYS))
}

fn stored_km<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(stored_number(Option::<Value>::deserialize(deserializer)?).unwrap_or(DEFAULT_THRESHOLD_KM))
}

/// Only JSON numbers count; fractions are truncated.
fn stored_number(value: Option<Value>) -> Option<i64> {
    let number = match value? {
        Value::Number(number) => number,
        _ => return None,
    };
    number
        .as_i64()
        .or_else(|| number.as_f64().filter(|value| value.is_finite()).map(|value| value as i64))
}

#[cfg(test)]
mod tests {
    use super::Thresholds;

    fn from_input(days: &str, km: &str) -> Thresholds {
        Thresholds { days: 12, km: 600 }.with_days_input(days).with_km_input(km)
    }

    #[test]
    fn blank_or_zero_input_uses_defaults() {
        assert_eq!(from_input("", ""), Thresholds { days: 30, km: 1000 });
        assert_eq!(from_input("0", "abc"), Thresholds { days: 30, km: 1000 });
    }

    #[test]
    fn input_is_raised_to_minimums() {
        assert_eq!(from_input("-4", "50"), Thresholds { days: 1, km: 100 });
        assert_eq!(from_input("45", "2.500"), Thresholds { days: 45, km: 2500 });
    }

    #[test]
    fn one_unusable_stored_value_keeps_the_other() {
        let parsed: Thresholds =
            serde_json::from_str(r#"{"thresholdDays":"abc","thresholdKm":400}"#)
                .expect("settings should parse");
        assert_eq!(parsed, Thresholds { days: 30, km: 400 });

        let parsed: Thresholds =
            serde_json::from_str(r#"{"thresholdDays":14.7,"thresholdKm":null}"#)
                .expect("settings should parse");
        assert_eq!(parsed, Thresholds { days: 14, km: 1000 });
    }

    #[test]
    fn partial_settings_deserialize_with_defaults() {
        let parsed: Thresholds =
            serde_json::from_str(r#"{"thresholdKm": 400}"#).expect("settings should parse");
        assert_eq!(parsed, Thresholds { days: 30, km: 400 });

        let json = serde_json::to_value(Thresholds::new(10, 150)).expect("serialize");
        assert_eq!(json["thresholdDays"], 10);
        assert_eq!(json["thresholdKm"], 150);
    }

    #[test]
    fn sanitized_repairs_stored_values() {
        assert_eq!(Thresholds { days: 0, km: 20 }.sanitized(), Thresholds { days: 30, km: 100 });
    }
}
