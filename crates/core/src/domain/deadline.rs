use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::Status;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineKind {
    Service,
    Tax,
    Inspection,
    Insurance,
}

impl DeadlineKind {
    /// Fixed rendering order of the status table.
    pub const ORDER: [DeadlineKind; 4] =
        [Self::Service, Self::Tax, Self::Inspection, Self::Insurance];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Tax => "Road tax",
            Self::Inspection => "Inspection",
            Self::Insurance => "Insurance",
        }
    }
}

/// One row of the status table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineItem {
    pub kind: DeadlineKind,
    pub detail: String,
    pub remaining: String,
    pub status: Status,
    pub due_date: NaiveDate,
    pub remaining_days: i64,
    /// Only the service item has a distance axis.
    pub due_distance: Option<i64>,
    pub remaining_distance: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineReport {
    pub items: Vec<DeadlineItem>,
    pub global: Status,
}

impl DeadlineReport {
    pub fn item(&self, kind: DeadlineKind) -> Option<&DeadlineItem> {
        self.items.iter().find(|item| item.kind == kind)
    }
}
