use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::reference::RegionFeeTable;

/// Raw text of every form field, exactly as the user left it. This is what
/// gets persisted between sessions; validation turns it into records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSnapshot {
    #[serde(deserialize_with = "lenient_text")]
    pub vehicle: String,
    #[serde(deserialize_with = "lenient_text")]
    pub region: String,
    #[serde(deserialize_with = "lenient_text")]
    pub tariff: String,
    #[serde(deserialize_with = "lenient_text")]
    pub current_km: String,
    #[serde(deserialize_with = "lenient_text")]
    pub last_service_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub last_service_km: String,
    #[serde(alias = "expiryBollo", deserialize_with = "lenient_text")]
    pub expiry_tax: String,
    #[serde(alias = "expiryRevisione", deserialize_with = "lenient_text")]
    pub expiry_inspection: String,
    #[serde(alias = "expiryAssicurazione", deserialize_with = "lenient_text")]
    pub expiry_insurance: String,
}

impl FormSnapshot {
    /// Re-derives the read-only tariff field from the selected region.
    pub fn refresh_tariff(&mut self, regions: &RegionFeeTable) {
        self.tariff = regions.lookup(&self.region).map(|fee| fee.to_string()).unwrap_or_default();
    }

    pub fn is_blank(&self) -> bool {
        self == &Self::default()
    }
}

/// A single edit event: every `Some` field overwrites the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormPatch {
    pub vehicle: Option<String>,
    pub region: Option<String>,
    pub current_km: Option<String>,
    pub last_service_date: Option<String>,
    pub last_service_km: Option<String>,
    pub expiry_tax: Option<String>,
    pub expiry_inspection: Option<String>,
    pub expiry_insurance: Option<String>,
}

impl FormPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply(self, form: &mut FormSnapshot, regions: &RegionFeeTable) {
        let fields = [
            (self.vehicle, &mut form.vehicle),
            (self.region, &mut form.region),
            (self.current_km, &mut form.current_km),
            (self.last_service_date, &mut form.last_service_date),
            (self.last_service_km, &mut form.last_service_km),
            (self.expiry_tax, &mut form.expiry_tax),
            (self.expiry_inspection, &mut form.expiry_inspection),
            (self.expiry_insurance, &mut form.expiry_insurance),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        form.refresh_tariff(regions);
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}
