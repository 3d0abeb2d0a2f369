//! Deadline aggregation: turns validated records into the four status rows
//! and the global traffic light.

pub mod text;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use text::DisplayFormat;

use crate::domain::deadline::{DeadlineItem, DeadlineKind, DeadlineReport};
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::thresholds::Thresholds;
use crate::domain::vehicle::VehicleRecord;
use crate::status::{classify_by_days, classify_service, worst, Status};
use crate::temporal::{add_months, days_between};

pub const DEFAULT_SERVICE_INTERVAL_KM: i64 = 15_000;
pub const DEFAULT_SERVICE_INTERVAL_MONTHS: i32 = 12;

/// A service is due every `distance_km` or every `months`, whichever comes
/// first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInterval {
    pub distance_km: i64,
    pub months: i32,
}

impl Default for ServiceInterval {
    fn default() -> Self {
        Self { distance_km: DEFAULT_SERVICE_INTERVAL_KM, months: DEFAULT_SERVICE_INTERVAL_MONTHS }
    }
}

/// Both forms passed validation. Only this type reaches the aggregator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedVehicle {
    pub vehicle: VehicleRecord,
    pub maintenance: MaintenanceRecord,
}

#[derive(Clone, Debug, Default)]
pub struct DeadlineAggregator {
    interval: ServiceInterval,
    display: DisplayFormat,
}

impl DeadlineAggregator {
    pub fn new(interval: ServiceInterval, display: DisplayFormat) -> Self {
        Self { interval, display }
    }

    pub fn display(&self) -> &DisplayFormat {
        &self.display
    }

    pub fn evaluate(
        &self,
        tracked: &TrackedVehicle,
        thresholds: &Thresholds,
        today: NaiveDate,
    ) -> DeadlineReport {
        let maintenance = &tracked.maintenance;
        let items = vec![
            self.service_item(maintenance, thresholds, today),
            self.expiry_item(DeadlineKind::Tax, maintenance.tax_expiry, thresholds, today),
            self.expiry_item(
                DeadlineKind::Inspection,
                maintenance.inspection_expiry,
                thresholds,
                today,
            ),
            self.expiry_item(
                DeadlineKind::Insurance,
                maintenance.insurance_expiry,
                thresholds,
                today,
            ),
        ];
        let global = worst(items.iter().map(|item| item.status));

        DeadlineReport { items, global }
    }

    fn service_item(
        &self,
        maintenance: &MaintenanceRecord,
        thresholds: &Thresholds,
        today: NaiveDate,
    ) -> DeadlineItem {
        let next_distance =
            maintenance.last_service_distance.saturating_add(self.interval.distance_km);
        let remaining_distance = next_distance.saturating_sub(maintenance.current_distance);
        let next_date = add_months(maintenance.last_service_date, self.interval.months);
        let remaining_days = days_between(today, next_date);

        let status = classify_service(
            Some(remaining_distance),
            Some(remaining_days),
            thresholds.km,
            thresholds.days,
        );

        DeadlineItem {
            kind: DeadlineKind::Service,
            detail: format!(
                "Next at {} km or by {}",
                self.display.distance(next_distance),
                self.display.date(next_date)
            ),
            remaining: format!(
                "{} • {}",
                self.display.remaining_distance(remaining_distance),
                self.display.remaining_days(remaining_days)
            ),
            status,
            due_date: next_date,
            remaining_days,
            due_distance: Some(next_distance),
            remaining_distance: Some(remaining_distance),
        }
    }

    fn expiry_item(
        &self,
        kind: DeadlineKind,
        expiry: NaiveDate,
        thresholds: &Thresholds,
        today: NaiveDate,
    ) -> DeadlineItem {
        let remaining_days = days_between(today, expiry);
        let status: Status = classify_by_days(remaining_days, thresholds.days);

        DeadlineItem {
            kind,
            detail: format!("By {}", self.display.date(expiry)),
            remaining: self.display.remaining_days(remaining_days),
            status,
            due_date: expiry,
            remaining_days,
            due_distance: None,
            remaining_distance: None,
        }
    }
}

pub fn global_message(status: Status) -> &'static str {
    match status {
        Status::Expired => "Attention: something has expired",
        Status::Warning => "Due soon: check the dates",
        Status::Ok => "All good",
    }
}
