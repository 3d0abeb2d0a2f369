use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validated vehicle form. `fee` is derived from the region and never edited
/// directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub name: String,
    pub region: String,
    pub fee: Decimal,
}
