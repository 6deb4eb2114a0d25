use crate::consts::{DECEMBER, ISO_SEPARATOR, MAX_YEAR, MIN_YEAR};
use crate::prelude::*;
use crate::types::{Day, Month, Weekday, Year};
use chrono::{Datelike, Duration, NaiveDate};
use std::str::FromStr;

/// A calendar date (year, month, day) with no time-of-day component.
///
/// Always a real proleptic Gregorian date within years `1..=9999`.
/// Field order gives chronological ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct DateValue {
    year: Year,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", DECEMBER)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl DateValue {
    /// Creates a date from already validated components
    pub const fn from_parts(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    /// Creates a date from raw numbers, validating each component.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first invalid component.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// The same date as a chrono `NaiveDate`.
    pub fn naive(&self) -> NaiveDate {
        // Years 1..=9999 are always representable.
        NaiveDate::from_ymd_opt(
            i32::from(self.year()),
            u32::from(self.month()),
            u32::from(self.day()),
        )
        .unwrap_or_default()
    }

    pub fn weekday(&self) -> Weekday {
        Weekday::from(self.naive().weekday())
    }

    /// Adds (or subtracts, when negative) whole days.
    ///
    /// Returns `None` when the result leaves years `1..=9999`.
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        let date = self.naive().checked_add_signed(Duration::try_days(days)?)?;
        Self::try_from(date).ok()
    }

    /// Signed number of days from `self` to `other`
    pub fn days_until(&self, other: &Self) -> i64 {
        other.naive().signed_duration_since(self.naive()).num_days()
    }
}

impl DateValue {
    /// Today's date in the local time zone.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the clock is past year 9999.
    pub fn today() -> Result<Self, ParseError> {
        Self::try_from(chrono::Local::now().date_naive())
    }
}

impl TryFrom<NaiveDate> for DateValue {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let invalid = |_: std::num::TryFromIntError| ParseError::InvalidFormat(date.to_string());
        Self::from_ymd(
            u16::try_from(date.year()).map_err(invalid)?,
            u8::try_from(date.month()).map_err(invalid)?,
            u8::try_from(date.day()).map_err(invalid)?,
        )
    }
}

impl DateValue {
    fn parse_number<T: FromStr>(s: &str) -> Result<T, ParseError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        s.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Builds a date from textual year, month and day tokens.
    pub(crate) fn from_tokens(year: &str, month: &str, day: &str) -> Result<Self, ParseError> {
        let year = Year::new(Self::parse_number(year.trim())?)?;
        let month = Month::new(Self::parse_number(month.trim())?)?;
        let day = Day::new(Self::parse_number(day.trim())?, year, month)?;
        Ok(Self { year, month, day })
    }
}

/// Parses the ISO `YYYY-MM-DD` form exchanged with the host page.
impl FromStr for DateValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(ISO_SEPARATOR).collect();
        match parts.as_slice() {
            [year, month, day] => Self::from_tokens(year, month, day),
            _ => Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{ISO_SEPARATOR}MM{ISO_SEPARATOR}DD, got {trimmed}"
            ))),
        }
    }
}

impl serde::Serialize for DateValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
