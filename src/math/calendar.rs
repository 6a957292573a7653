//! `YYYY-MM` month anchors for the overlap timeline.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// Month containing today's local date.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            first_day: today.with_day(1).unwrap_or(today),
        }
    }

    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    /// 1..=12
    pub fn month(self) -> u32 {
        self.first_day.month()
    }

    /// 0-based position in the year (January = 0).
    pub fn month0(self) -> u32 {
        self.first_day.month0()
    }

    /// The month `n` months later; saturates at the end of chrono's range.
    pub fn plus_months(self, n: u32) -> Self {
        let first_day = self
            .first_day
            .checked_add_months(Months::new(n))
            .unwrap_or(self.first_day);
        Self { first_day }
    }

    /// `count` consecutive months starting at `self`.
    pub fn sequence(self, count: usize) -> Vec<YearMonth> {
        (0..count as u32).map(|i| self.plus_months(i)).collect()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day.format("%Y-%m"))
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || AppError::new(3, format!("Invalid month '{s}' (expected YYYY-MM)."));
        if trimmed.len() != 7 || trimmed.as_bytes()[4] != b'-' {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map(|first_day| Self { first_day })
            .map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats() {
        let ym: YearMonth = "2025-01".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.month(), 1);
        assert_eq!(ym.month0(), 0);
        assert_eq!(ym.to_string(), "2025-01");
    }

    #[test]
    fn rejects_malformed_months() {
        for bad in ["2025-13", "2025-1", "25-01", "2025/01", "", "abcd-ef"] {
            assert!(bad.parse::<YearMonth>().is_err(), "{bad}");
        }
    }

    #[test]
    fn sequence_rolls_over_year_end() {
        let start: YearMonth = "2025-11".parse().unwrap();
        let labels: Vec<String> = start.sequence(4).iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, vec!["2025-11", "2025-12", "2026-01", "2026-02"]);
    }
}
