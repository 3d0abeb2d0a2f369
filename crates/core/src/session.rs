//! The running session: the state the host restores at startup, mutates on
//! every edit and re-evaluates after each change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::deadlines::{DeadlineAggregator, TrackedVehicle};
use crate::domain::form::{FormPatch, FormSnapshot};
use crate::domain::theme::Theme;
use crate::domain::thresholds::Thresholds;
use crate::reference::RegionFeeTable;
use crate::render::RenderOutcome;
use crate::validation::{validate_maintenance, validate_vehicle, ValidationError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub theme: Option<Theme>,
    pub thresholds: Thresholds,
    pub form: FormSnapshot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub vehicle_errors: Vec<ValidationError>,
    pub maintenance_errors: Vec<ValidationError>,
    pub fee: Option<Decimal>,
    pub outcome: RenderOutcome,
}

impl Evaluation {
    pub fn is_valid(&self) -> bool {
        self.vehicle_errors.is_empty() && self.maintenance_errors.is_empty()
    }
}

impl Session {
    pub fn edit(&mut self, patch: FormPatch, regions: &RegionFeeTable) {
        patch.apply(&mut self.form, regions);
    }

    pub fn evaluate(
        &self,
        regions: &RegionFeeTable,
        aggregator: &DeadlineAggregator,
        today: NaiveDate,
    ) -> Evaluation {
        evaluate(&self.form, regions, &self.thresholds, aggregator, today)
    }
}

/// Validates both forms and, only when both pass, runs the aggregator.
pub fn evaluate(
    form: &FormSnapshot,
    regions: &RegionFeeTable,
    thresholds: &Thresholds,
    aggregator: &DeadlineAggregator,
    today: NaiveDate,
) -> Evaluation {
    let fee = regions.lookup(&form.region);
    let vehicle = validate_vehicle(form, regions);
    let maintenance = validate_maintenance(form);

    match (vehicle, maintenance) {
        (Ok(vehicle), Ok(maintenance)) => {
            let tracked = TrackedVehicle { vehicle, maintenance };
            let report = aggregator.evaluate(&tracked, thresholds, today);
            Evaluation {
                vehicle_errors: Vec::new(),
                maintenance_errors: Vec::new(),
                fee,
                outcome: RenderOutcome::from_report(report),
            }
        }
        (vehicle, maintenance) => Evaluation {
            vehicle_errors: vehicle.err().unwrap_or_default(),
            maintenance_errors: maintenance.err().unwrap_or_default(),
            fee,
            outcome: RenderOutcome::placeholder(),
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{evaluate, Session};
    use crate::deadlines::DeadlineAggregator;
    use crate::domain::form::{FormPatch, FormSnapshot};
    use crate::domain::thresholds::Thresholds;
    use crate::reference::RegionFeeTable;
    use crate::render::{PLACEHOLDER_MESSAGE, WAITING_MESSAGE};
    use crate::status::Status;
    use crate::validation::{FormField, ValidationReason};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn regions() -> RegionFeeTable {
        RegionFeeTable::build([("Lazio", Some(Decimal::from(140)))])
    }

    fn form() -> FormSnapshot {
        FormSnapshot {
            vehicle: "Fiat Panda".to_string(),
            region: "lazio".to_string(),
            tariff: String::new(),
            current_km: "24500".to_string(),
            last_service_date: "2023-06-15".to_string(),
            last_service_km: "10000".to_string(),
            expiry_tax: "2024-12-31".to_string(),
            expiry_inspection: "2024-12-31".to_string(),
            expiry_insurance: "2024-12-31".to_string(),
        }
    }

    #[test]
    fn valid_forms_produce_the_status_table() {
        let evaluation = evaluate(
            &form(),
            &regions(),
            &Thresholds { days: 30, km: 1000 },
            &DeadlineAggregator::default(),
            date(2024, 6, 20),
        );

        assert!(evaluation.is_valid());
        assert_eq!(evaluation.fee, Some(Decimal::from(140)));
        assert_eq!(evaluation.outcome.items().len(), 4);
        assert_eq!(evaluation.outcome.global().status, Status::Expired);
        assert_eq!(evaluation.outcome.global().text, "Attention: something has expired");
    }

    #[test]
    fn distance_below_last_service_shows_placeholder() {
        let invalid = FormSnapshot { current_km: "9000".to_string(), ..form() };
        let evaluation = evaluate(
            &invalid,
            &regions(),
            &Thresholds::default(),
            &DeadlineAggregator::default(),
            date(2024, 6, 20),
        );

        assert!(!evaluation.is_valid());
        assert!(evaluation.vehicle_errors.is_empty());
        assert_eq!(evaluation.maintenance_errors.len(), 1);
        assert_eq!(evaluation.maintenance_errors[0].field, FormField::CurrentKm);
        assert_eq!(evaluation.maintenance_errors[0].reason, ValidationReason::BelowLastService);

        assert!(evaluation.outcome.is_placeholder());
        assert_eq!(evaluation.outcome.global().status, Status::Warning);
        assert_eq!(evaluation.outcome.global().text, WAITING_MESSAGE);
        let json = serde_json::to_value(&evaluation.outcome).expect("serialize");
        assert_eq!(json["message"], PLACEHOLDER_MESSAGE);
    }

    #[test]
    fn both_forms_report_errors_together() {
        let evaluation = evaluate(
            &FormSnapshot::default(),
            &regions(),
            &Thresholds::default(),
            &DeadlineAggregator::default(),
            date(2024, 6, 20),
        );

        assert_eq!(evaluation.vehicle_errors.len(), 2);
        assert_eq!(evaluation.maintenance_errors.len(), 6);
        assert_eq!(evaluation.fee, None);
    }

    #[test]
    fn session_edits_flow_into_the_next_evaluation() {
        let mut session = Session { form: form(), ..Session::default() };
        session.edit(
            FormPatch { last_service_date: Some("2024-06-01".to_string()), ..FormPatch::default() },
            &regions(),
        );

        let evaluation =
            session.evaluate(&regions(), &DeadlineAggregator::default(), date(2024, 6, 20));

        assert_eq!(session.form.tariff, "140");
        assert_eq!(evaluation.outcome.global().status, Status::Warning);
    }

    #[test]
    fn huge_odometer_readings_fall_back_to_the_placeholder() {
        let huge = FormSnapshot {
            current_km: "9223372036854775807".to_string(),
            last_service_km: "9223372036854775807".to_string(),
            ..form()
        };
        let evaluation = evaluate(
            &huge,
            &regions(),
            &Thresholds::default(),
            &DeadlineAggregator::default(),
            date(2024, 6, 20),
        );

        let reasons: Vec<_> =
            evaluation.maintenance_errors.iter().map(|error| (error.field, error.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (FormField::CurrentKm, ValidationReason::OutOfRange),
                (FormField::LastServiceKm, ValidationReason::OutOfRange),
            ]
        );
        assert!(evaluation.outcome.is_placeholder());
    }
}
