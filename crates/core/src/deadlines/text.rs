use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::temporal::{format_date, ISO_DATE};

/// How dates and distances are written into the status table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFormat {
    pub date_format: String,
    pub thousands_separator: String,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self { date_format: ISO_DATE.to_string(), thousands_separator: ",".to_string() }
    }
}

impl DisplayFormat {
    pub fn date(&self, date: NaiveDate) -> String {
        format_date(date, &self.date_format)
    }

    pub fn distance(&self, value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, digit) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(digit);
        }
        if value < 0 {
            grouped.insert(0, '-');
        }
        grouped
    }

    pub fn remaining_days(&self, days: i64) -> String {
        if days >= 0 {
            format!("in {days} days")
        } else {
            format!("expired {} days ago", days.unsigned_abs())
        }
    }

    pub fn remaining_distance(&self, distance: i64) -> String {
        if distance >= 0 {
            format!("in {} km", self.distance(distance))
        } else {
            format!("over by {} km", self.distance(distance.saturating_abs()))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::DisplayFormat;

    #[test]
    fn distances_are_grouped_by_thousands() {
        let display = DisplayFormat::default();
        assert_eq!(display.distance(0), "0");
        assert_eq!(display.distance(999), "999");
        assert_eq!(display.distance(25_000), "25,000");
        assert_eq!(display.distance(1_234_567), "1,234,567");
        assert_eq!(display.distance(-1_500), "-1,500");

        let dotted = DisplayFormat { thousands_separator: ".".to_string(), ..display };
        assert_eq!(dotted.distance(25_000), "25.000");
    }

    #[test]
    fn remaining_text_distinguishes_overdue_values() {
        let display = DisplayFormat::default();
        assert_eq!(display.remaining_days(12), "in 12 days");
        assert_eq!(display.remaining_days(0), "in 0 days");
        assert_eq!(display.remaining_days(-5), "expired 5 days ago");
        assert_eq!(display.remaining_distance(500), "in 500 km");
        assert_eq!(display.remaining_distance(-1_200), "over by 1,200 km");
        assert_eq!(display.remaining_distance(i64::MIN), "over by 9,223,372,036,854,775,807 km");
    }

    #[test]
    fn dates_follow_the_configured_pattern() {
        let display = DisplayFormat { date_format: "%d/%m/%Y".to_string(), ..Default::default() };
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).expect("date");
        assert_eq!(display.date(date), "15/06/2024");
    }
}
