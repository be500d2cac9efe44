//! Calendar-month billing periods.
//!
//! A [`Period`] is compared by `(year, month)` rather than by its textual
//! form, so ordering does not depend on zero-padding.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A billing month such as `2024-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(Error::InvalidPeriod(format!("{}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date.
    ///
    /// Ledger queries never call this; it only supplies a default for callers.
    pub fn current() -> Self {
        use chrono::Datelike;
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1..=12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month before this one, or `None` before `0001-01`.
    pub fn previous(&self) -> Option<Self> {
        let (year, month) = match self.month {
            1 => (self.year - 1, 12),
            m => (self.year, m - 1),
        };
        Self::new(year, month).ok()
    }

    /// The month after this one, or `None` after `9999-12`.
    pub fn next(&self) -> Option<Self> {
        let (year, month) = match self.month {
            12 => (self.year + 1, 1),
            m => (self.year, m + 1),
        };
        Self::new(year, month).ok()
    }

    /// Human-facing caption printed under the receipt title.
    pub fn caption(&self) -> String {
        format!("Month {:02} / {}", self.month, self.year)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPeriod(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.is_empty() || month.len() > 2 || !digits(year) || !digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Period::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Period {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let period = p("2024-03");
        assert_eq!(period.year(), 2024);
        assert_eq!(period.month(), 3);
        assert_eq!(period.to_string(), "2024-03");
    }

    #[test]
    fn test_parse_unpadded_month() {
        assert_eq!(p("2024-3"), p("2024-03"));
    }

    #[test]
    fn test_reject_invalid() {
        assert!("2024-13".parse::<Period>().is_err());
        assert!("2024-00".parse::<Period>().is_err());
        assert!("2024".parse::<Period>().is_err());
        assert!("24-03".parse::<Period>().is_err());
        assert!("march".parse::<Period>().is_err());
        assert!(matches!("2024-xx".parse::<Period>(), Err(Error::InvalidPeriod(_))));
    }

    #[test]
    fn test_reject_signs() {
        assert!("+024-03".parse::<Period>().is_err());
        assert!("2024-+3".parse::<Period>().is_err());
        assert!("-024-03".parse::<Period>().is_err());
        assert!("0000-12".parse::<Period>().is_err());
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(p("2024-09") < p("2024-10"));
        assert!(p("2023-12") < p("2024-01"));
        assert!(p("2024-2") < p("2024-10"));
    }

    #[test]
    fn test_previous_and_next_wrap_years() {
        assert_eq!(p("2024-01").previous(), Some(p("2023-12")));
        assert_eq!(p("2023-12").next(), Some(p("2024-01")));
        assert_eq!(p("2024-05").next().and_then(|n| n.previous()), Some(p("2024-05")));
    }

    #[test]
    fn test_previous_and_next_stay_in_range() {
        assert_eq!(p("0001-01").previous(), None);
        assert_eq!(p("9999-12").next(), None);
        for edge in [p("0001-02").previous(), p("9999-11").next()] {
            let edge = edge.unwrap();
            assert_eq!(edge.to_string().parse::<Period>().unwrap(), edge);
        }
    }

    #[test]
    fn test_caption() {
        assert_eq!(p("2024-03").caption(), "Month 03 / 2024");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&p("2024-03")).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p("2024-03"));
        assert!(serde_json::from_str::<Period>("\"2024-99\"").is_err());
    }
}
