use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DatingError;

/// Days per month for a common year, January first.
const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A proleptic Gregorian calendar date.
///
/// Only constructible through [`CalendarDate::new`], so every value in
/// circulation names a day that exists (no February 30, no month 13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: u16,
    month: u8,
    day: u8,
}

impl CalendarDate {
    pub fn new(year: u16, month: u8, day: u8) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 {
            return None;
        }
        if day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Checked constructor for values straight out of a regex capture.
    pub fn from_parts(year: u32, month: u32, day: u32) -> Option<Self> {
        Self::new(
            u16::try_from(year).ok()?,
            u8::try_from(month).ok()?,
            u8::try_from(day).ok()?,
        )
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Same month and day one year later. February 29 maps to February 28
    /// when the following year is not a leap year.
    pub fn one_year_later(&self) -> Self {
        let year = self.year.saturating_add(1);
        let day = self.day.min(days_in_month(year, self.month));
        Self {
            year,
            month: self.month,
            day,
        }
    }

    /// Filename prefix form: `YYYY.MM.DD`.
    pub fn prefix(&self) -> String {
        format!("{:04}.{:02}.{:02}", self.year, self.month, self.day)
    }

    /// Parse the `YYYY.MM.DD` prefix form.
    pub fn parse_prefix(s: &str) -> Option<Self> {
        parse_three_part(s, '.')
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DatingError;

    /// Parses ISO `YYYY-MM-DD`, the form accepted for date overrides.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_three_part(s.trim(), '-').ok_or_else(|| DatingError::InvalidDate(s.to_string()))
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DatingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl From<chrono::NaiveDate> for CalendarDate {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        // chrono only hands out real dates; the clamp keeps year in u16 range.
        Self {
            year: date.year().clamp(0, i32::from(u16::MAX)) as u16,
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_IN_MONTH[usize::from(month - 1)],
        _ => 0,
    }
}

/// Month number for a full or three-letter English month name.
/// Case-insensitive; a trailing period is ignored.
pub fn month_from_name(name: &str) -> Option<u8> {
    let lower = name.trim_end_matches('.').to_ascii_lowercase();
    let month = match lower.as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn parse_three_part(s: &str, sep: char) -> Option<CalendarDate> {
    let mut parts = s.split(sep);
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return None;
    }
    CalendarDate::new(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_impossible_dates() {
        assert!(CalendarDate::new(2024, 13, 1).is_none());
        assert!(CalendarDate::new(2024, 0, 1).is_none());
        assert!(CalendarDate::new(2024, 1, 32).is_none());
        assert!(CalendarDate::new(2024, 1, 0).is_none());
        assert!(CalendarDate::new(2024, 2, 30).is_none());
        assert!(CalendarDate::new(2024, 4, 31).is_none());
    }

    #[test]
    fn leap_year_rules() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(CalendarDate::new(2024, 2, 29).is_some());
        assert!(CalendarDate::new(2023, 2, 29).is_none());
        assert!(CalendarDate::new(1900, 2, 29).is_none());
    }

    #[test]
    fn from_parts_rejects_overflow() {
        assert!(CalendarDate::from_parts(70_000, 1, 1).is_none());
        assert!(CalendarDate::from_parts(2024, 300, 1).is_none());
        assert_eq!(
            CalendarDate::from_parts(2024, 1, 15),
            CalendarDate::new(2024, 1, 15)
        );
    }

    #[test]
    fn prefix_round_trip() {
        let date = CalendarDate::new(2024, 3, 9).unwrap();
        assert_eq!(date.prefix(), "2024.03.09");
        assert_eq!(CalendarDate::parse_prefix(&date.prefix()), Some(date));
    }

    #[test]
    fn parse_iso_override() {
        let date: CalendarDate = "2024-12-25".parse().unwrap();
        assert_eq!(date, CalendarDate::new(2024, 12, 25).unwrap());
        assert_eq!(date.to_string(), "2024-12-25");
    }

    #[test]
    fn parse_iso_rejects_bad_input() {
        assert!("2024-02-30".parse::<CalendarDate>().is_err());
        assert!("2024/01/15".parse::<CalendarDate>().is_err());
        assert!("24-01-15".parse::<CalendarDate>().is_err());
        assert!("2024-1-15".parse::<CalendarDate>().is_err());
        assert!("".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn one_year_later_clamps_leap_day() {
        let leap = CalendarDate::new(2024, 2, 29).unwrap();
        assert_eq!(leap.one_year_later(), CalendarDate::new(2025, 2, 28).unwrap());
        let plain = CalendarDate::new(2026, 10, 19).unwrap();
        assert_eq!(plain.one_year_later(), CalendarDate::new(2027, 10, 19).unwrap());
    }

    #[test]
    fn month_names_full_and_abbreviated() {
        assert_eq!(month_from_name("January"), Some(1));
        assert_eq!(month_from_name("SEP"), Some(9));
        assert_eq!(month_from_name("Dec."), Some(12));
        assert_eq!(month_from_name("may"), Some(5));
        assert_eq!(month_from_name("Sept"), None);
        assert_eq!(month_from_name("Monday"), None);
    }

    #[test]
    fn converts_from_chrono() {
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(CalendarDate::from(naive), CalendarDate::new(2024, 1, 15).unwrap());
    }

    #[test]
    fn ordering_is_chronological() {
        let a = CalendarDate::new(2023, 12, 31).unwrap();
        let b = CalendarDate::new(2024, 1, 1).unwrap();
        assert!(a < b);
    }
}
