//! Form validation. Every rule is checked and all violations are reported
//! together; nothing here fails fast.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::form::FormSnapshot;
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::vehicle::VehicleRecord;
use crate::reference::RegionFeeTable;
use crate::temporal::parse_calendar_date;

/// Largest odometer reading the form accepts.
pub const MAX_DISTANCE_KM: i64 = 10_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Vehicle,
    Region,
    CurrentKm,
    LastServiceDate,
    LastServiceKm,
    ExpiryTax,
    ExpiryInspection,
    ExpiryInsurance,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vehicle => "vehicle",
            Self::Region => "region",
            Self::CurrentKm => "current distance",
            Self::LastServiceDate => "last service date",
            Self::LastServiceKm => "last service distance",
            Self::ExpiryTax => "road tax expiry",
            Self::ExpiryInspection => "inspection expiry",
            Self::ExpiryInsurance => "insurance expiry",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    Required,
    UnknownRegion,
    FeeUnavailable,
    NotANonNegativeInteger,
    OutOfRange,
    InvalidDate,
    BelowLastService,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: FormField,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: FormField, reason: ValidationReason) -> Self {
        Self { field, reason }
    }

    pub fn message(&self) -> String {
        use FormField::*;
        use ValidationReason::*;

        match (self.field, self.reason) {
            (Vehicle, Required) => "Enter the vehicle.".to_string(),
            (Region, Required) => "Select the region.".to_string(),
            (Region, UnknownRegion) => "Invalid region: choose one from the list.".to_string(),
            (Region, FeeUnavailable) => "No fee available for the selected region.".to_string(),
            (CurrentKm, NotANonNegativeInteger) => {
                "Enter the current distance (number ≥ 0).".to_string()
            }
            (LastServiceKm, NotANonNegativeInteger) => {
                "Enter the distance at the last service (number ≥ 0).".to_string()
            }
            (CurrentKm | LastServiceKm, OutOfRange) => {
                format!("The {} cannot exceed 10,000,000 km.", self.field.label())
            }
            (CurrentKm, BelowLastService) => {
                "The current distance cannot be lower than the distance at the last service."
                    .to_string()
            }
            (LastServiceDate, Required) => "Enter the date of the last service.".to_string(),
            (ExpiryTax, Required) => "Enter the road tax expiry date.".to_string(),
            (ExpiryInspection, Required) => "Enter the inspection expiry date.".to_string(),
            (ExpiryInsurance, Required) => "Enter the insurance expiry date.".to_string(),
            (field, InvalidDate) => {
                format!("The {} is not a valid date (YYYY-MM-DD).", field.label())
            }
            (field, reason) => format!("The {} is invalid ({reason:?}).", field.label()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Joins messages the way the form shows them under each section.
pub fn summarize(errors: &[ValidationError]) -> String {
    errors.iter().map(ValidationError::message).collect::<Vec<_>>().join(" ")
}

/// Reads an integer the way the form input does: `.` thousands separators
/// are ignored, an optional sign and the leading digits are taken, trailing
/// text is dropped. Returns `None` when there are no leading digits.
pub fn parse_form_integer(raw: &str) -> Option<i64> {
    let cleaned: String = raw.trim().chars().filter(|ch| *ch != '.').collect();
    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };

    let end = unsigned.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

pub fn validate_vehicle(
    form: &FormSnapshot,
    regions: &RegionFeeTable,
) -> Result<VehicleRecord, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let name = form.vehicle.trim();
    let region = form.region.trim();

    if name.is_empty() {
        errors.push(ValidationError::new(FormField::Vehicle, ValidationReason::Required));
    }

    let mut fee = None;
    if region.is_empty() {
        errors.push(ValidationError::new(FormField::Region, ValidationReason::Required));
    } else {
        match regions.get(region) {
            None => errors
                .push(ValidationError::new(FormField::Region, ValidationReason::UnknownRegion)),
            Some(entry) if entry.fee.is_none() => errors
                .push(ValidationError::new(FormField::Region, ValidationReason::FeeUnavailable)),
            Some(entry) => fee = entry.fee,
        }
    }

    match fee {
        Some(fee) if errors.is_empty() => {
            Ok(VehicleRecord { name: name.to_string(), region: region.to_string(), fee })
        }
        _ => Err(errors),
    }
}

pub fn validate_maintenance(
    form: &FormSnapshot,
) -> Result<MaintenanceRecord, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let current_distance = distance(&form.current_km, FormField::CurrentKm, &mut errors);

    let last_service_date =
        required_date(&form.last_service_date, FormField::LastServiceDate, &mut errors);

    let last_service_distance =
        distance(&form.last_service_km, FormField::LastServiceKm, &mut errors);

    if let (Some(current), Some(last)) = (current_distance, last_service_distance) {
        if current < last {
            errors.push(ValidationError::new(
                FormField::CurrentKm,
                ValidationReason::BelowLastService,
            ));
        }
    }

    let tax_expiry = required_date(&form.expiry_tax, FormField::ExpiryTax, &mut errors);
    let inspection_expiry =
        required_date(&form.expiry_inspection, FormField::ExpiryInspection, &mut errors);
    let insurance_expiry =
        required_date(&form.expiry_insurance, FormField::ExpiryInsurance, &mut errors);

    match (
        current_distance,
        last_service_date,
        last_service_distance,
        tax_expiry,
        inspection_expiry,
        insurance_expiry,
    ) {
        (
            Some(current_distance),
            Some(last_service_date),
            Some(last_service_distance),
            Some(tax_expiry),
            Some(inspection_expiry),
            Some(insurance_expiry),
        ) if errors.is_empty() => Ok(MaintenanceRecord {
            current_distance,
            last_service_date,
            last_service_distance,
            tax_expiry,
            inspection_expiry,
            insurance_expiry,
        }),
        _ => Err(errors),
    }
}

fn distance(raw: &str, field: FormField, errors: &mut Vec<ValidationError>) -> Option<i64> {
    let reason = match parse_form_integer(raw) {
        Some(value) if (0..=MAX_DISTANCE_KM).contains(&value) => return Some(value),
        Some(value) if value > MAX_DISTANCE_KM => ValidationReason::OutOfRange,
        // Digits too long for i64 are also out of range, not malformed.
        None if starts_with_digit(raw) => ValidationReason::OutOfRange,
        _ => ValidationReason::NotANonNegativeInteger,
    };
    errors.push(ValidationError::new(field, reason));
    None
}

fn starts_with_digit(raw: &str) -> bool {
    raw.trim().trim_start_matches('+').starts_with(|ch: char| ch.is_ascii_digit())
}

fn required_date(
    raw: &str,
    field: FormField,
    errors: &mut Vec<ValidationError>,
) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        errors.push(ValidationError::new(field, ValidationReason::Required));
        return None;
    }
    let parsed = parse_calendar_date(raw);
    if parsed.is_none() {
        errors.push(ValidationError::new(field, ValidationReason::InvalidDate));
    }
    parsed
}
