use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Validated maintenance form. `last_service_distance <= current_distance`
/// holds for every value produced by validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub current_distance: i64,
    pub last_service_date: NaiveDate,
    pub last_service_distance: i64,
    pub tax_expiry: NaiveDate,
    pub inspection_expiry: NaiveDate,
    pub insurance_expiry: NaiveDate,
}
