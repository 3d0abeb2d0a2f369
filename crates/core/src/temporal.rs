//! Calendar-date arithmetic used by the deadline computations.
//!
//! Everything here works on [`NaiveDate`]; wall-clock time is truncated to a
//! local calendar date before it reaches these helpers.

use std::fmt::Write as _;

use chrono::{Local, Months, NaiveDate};

pub const ISO_DATE: &str = "%Y-%m-%d";

/// Adds whole months to `date`, clamping to the last valid day of the target
/// month (`2024-01-31 + 1 month = 2024-02-29`). Negative values move backwards.
///
/// Results outside chrono's representable range saturate at
/// [`NaiveDate::MAX`] / [`NaiveDate::MIN`].
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let step = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(step).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_months(step).unwrap_or(NaiveDate::MIN)
    }
}

/// Signed number of whole calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a `YYYY-MM-DD` form value. Blank or malformed input is not usable.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE).ok()
}

/// Renders `date` with a strftime pattern, falling back to ISO when the
/// pattern cannot be applied to a plain date.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", date.format(pattern)).is_err() {
        return date.format(ISO_DATE).to_string();
    }
    rendered
}

pub fn is_date_pattern_usable(pattern: &str) -> bool {
    let Some(sample) = NaiveDate::from_ymd_opt(2024, 1, 31) else {
        return false;
    };
    let mut rendered = String::new();
    !pattern.trim().is_empty() && write!(rendered, "{}", sample.format(pattern)).is_ok()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        add_months, days_between, format_date, is_date_pattern_usable, parse_calendar_date,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn add_months_clamps_to_end_of_month() {
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(add_months(date(2024, 3, 31), 1), date(2024, 4, 30));
    }

    #[test]
    fn add_months_crosses_year_boundaries() {
        assert_eq!(add_months(date(2023, 6, 15), 12), date(2024, 6, 15));
        assert_eq!(add_months(date(2024, 2, 29), 12), date(2025, 2, 28));
        assert_eq!(add_months(date(2024, 11, 30), 3), date(2025, 2, 28));
        assert_eq!(add_months(date(2024, 3, 31), -1), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 5, 10), 0), date(2024, 5, 10));
    }

    #[test]
    fn add_months_saturates_instead_of_overflowing() {
        assert_eq!(add_months(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(add_months(NaiveDate::MIN, -1), NaiveDate::MIN);
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 31)), 30);
        assert_eq!(days_between(date(2024, 1, 31), date(2024, 1, 1)), -30);
        assert_eq!(days_between(date(2024, 6, 20), date(2024, 6, 20)), 0);
        assert_eq!(days_between(date(2023, 12, 31), date(2024, 12, 31)), 366);
    }

    #[test]
    fn parse_calendar_date_rejects_blank_and_malformed_values() {
        assert_eq!(parse_calendar_date(" 2024-06-15 "), Some(date(2024, 6, 15)));
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("   "), None);
        assert_eq!(parse_calendar_date("2024-02-30"), None);
        assert_eq!(parse_calendar_date("15/06/2024"), None);
    }

    #[test]
    fn format_date_uses_pattern_and_falls_back_to_iso() {
        assert_eq!(format_date(date(2024, 6, 5), "%d/%m/%Y"), "05/06/2024");
        assert_eq!(format_date(date(2024, 6, 5), "%H:%M"), "2024-06-05");
        assert!(is_date_pattern_usable("%d.%m.%Y"));
        assert!(!is_date_pattern_usable("%H:%M"));
        assert!(!is_date_pattern_usable(""));
    }
}
