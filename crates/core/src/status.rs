use serde::{Deserialize, Serialize};

/// Traffic-light status of a deadline. Variants are declared in ascending
/// severity so `Ord` matches `Ok < Warning < Expired`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Ok,
    Warning,
    Expired,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "DUE SOON",
            Self::Expired => "EXPIRED",
        }
    }

    /// Three-tier style tag for visual rendering.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ok => "green",
            Self::Warning => "yellow",
            Self::Expired => "red",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify_by_days(remaining_days: i64, threshold_days: i64) -> Status {
    classify_remaining(remaining_days, threshold_days)
}

/// Classifies the service item on both axes and keeps the worse result.
/// A missing axis counts as `Ok`.
pub fn classify_service(
    remaining_distance: Option<i64>,
    remaining_days: Option<i64>,
    threshold_distance: i64,
    threshold_days: i64,
) -> Status {
    let distance_status = remaining_distance
        .map(|remaining| classify_remaining(remaining, threshold_distance))
        .unwrap_or(Status::Ok);
    let days_status = remaining_days
        .map(|remaining| classify_by_days(remaining, threshold_days))
        .unwrap_or(Status::Ok);
    worst([distance_status, days_status])
}

/// Highest-severity status of the sequence; `Ok` when empty.
pub fn worst<I>(statuses: I) -> Status
where
    I: IntoIterator<Item = Status>,
{
    statuses.into_iter().max().unwrap_or(Status::Ok)
}

fn classify_remaining(remaining: i64, threshold: i64) -> Status {
    if remaining < 0 {
        Status::Expired
    } else if remaining <= threshold {
        Status::Warning
    } else {
        Status::Ok
    }
}
