//! What the host renders after each evaluation: either a neutral placeholder
//! or the four deadline rows, always with a global indicator.

use serde::Serialize;

use crate::deadlines::global_message;
use crate::domain::deadline::{DeadlineItem, DeadlineReport};
use crate::status::Status;

pub const PLACEHOLDER_MESSAGE: &str =
    "Fill in the vehicle and maintenance fields to see the statuses.";
pub const WAITING_MESSAGE: &str = "Waiting for data";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GlobalIndicator {
    pub status: Status,
    pub label: &'static str,
    pub tag: &'static str,
    pub text: String,
}

impl GlobalIndicator {
    pub fn new(status: Status, text: impl Into<String>) -> Self {
        Self { status, label: status.label(), tag: status.tag(), text: text.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderOutcome {
    Placeholder { message: String, global: GlobalIndicator },
    Table { items: Vec<DeadlineItem>, global: GlobalIndicator },
}

impl RenderOutcome {
    /// Shown while the forms are incomplete. The `Warning` status is a fixed
    /// neutral default, not a computed result.
    pub fn placeholder() -> Self {
        Self::Placeholder {
            message: PLACEHOLDER_MESSAGE.to_string(),
            global: GlobalIndicator::new(Status::Warning, WAITING_MESSAGE),
        }
    }

    pub fn from_report(report: DeadlineReport) -> Self {
        let global = GlobalIndicator::new(report.global, global_message(report.global));
        Self::Table { items: report.items, global }
    }

    pub fn global(&self) -> &GlobalIndicator {
        match self {
            Self::Placeholder { global, .. } | Self::Table { global, .. } => global,
        }
    }

    pub fn items(&self) -> &[DeadlineItem] {
        match self {
            Self::Placeholder { .. } => &[],
            Self::Table { items, .. } => items,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}
