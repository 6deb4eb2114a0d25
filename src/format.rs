use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DateValue, ParseError, prelude::*};

/// Order of the year, month and day fields in a display pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldOrder {
    YearMonthDay,
    DayMonthYear,
    MonthDayYear,
}

/// Display pattern for the text field.
///
/// Only affects how a date is written and read back, never the
/// value handed to the host (always ISO `YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormatSpec {
    #[default]
    #[display(fmt = "YYYY/MM/DD")]
    YmdSlash,
    #[display(fmt = "DD/MM/YYYY")]
    DmySlash,
    #[display(fmt = "MM/DD/YYYY")]
    MdySlash,
    #[display(fmt = "YYYY-MM-DD")]
    YmdHyphen,
    #[display(fmt = "DD-MM-YYYY")]
    DmyHyphen,
    #[display(fmt = "MM-DD-YYYY")]
    MdyHyphen,
    #[display(fmt = "YYYY.MM.DD")]
    YmdDot,
    #[display(fmt = "DD.MM.YYYY")]
    DmyDot,
    #[display(fmt = "MM.DD.YYYY")]
    MdyDot,
}

/// Error for format patterns outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Unknown date format {0:?} (expected one of YYYY/MM/DD, DD/MM/YYYY, MM/DD/YYYY, YYYY-MM-DD, DD-MM-YYYY, MM-DD-YYYY, YYYY.MM.DD, DD.MM.YYYY, MM.DD.YYYY)")]
    Unknown(String),
}

impl FormatSpec {
    pub const ALL: [Self; 9] = [
        Self::YmdSlash,
        Self::DmySlash,
        Self::MdySlash,
        Self::YmdHyphen,
        Self::DmyHyphen,
        Self::MdyHyphen,
        Self::YmdDot,
        Self::DmyDot,
        Self::MdyDot,
    ];

    pub const fn separator(self) -> char {
        match self {
            Self::YmdSlash | Self::DmySlash | Self::MdySlash => '/',
            Self::YmdHyphen | Self::DmyHyphen | Self::MdyHyphen => '-',
            Self::YmdDot | Self::DmyDot | Self::MdyDot => '.',
        }
    }

    pub const fn order(self) -> FieldOrder {
        match self {
            Self::YmdSlash | Self::YmdHyphen | Self::YmdDot => FieldOrder::YearMonthDay,
            Self::DmySlash | Self::DmyHyphen | Self::DmyDot => FieldOrder::DayMonthYear,
            Self::MdySlash | Self::MdyHyphen | Self::MdyDot => FieldOrder::MonthDayYear,
        }
    }

    /// Renders `date` with zero-padded fields in this pattern.
    pub fn format(self, date: &DateValue) -> String {
        let sep = self.separator();
        let (y, m, d) = (date.year(), date.month(), date.day());
        match self.order() {
            FieldOrder::YearMonthDay => format!("{y:04}{sep}{m:02}{sep}{d:02}"),
            FieldOrder::DayMonthYear => format!("{d:02}{sep}{m:02}{sep}{y:04}"),
            FieldOrder::MonthDayYear => format!("{m:02}{sep}{d:02}{sep}{y:04}"),
        }
    }

    /// Reads text written in this pattern. Fields need not be zero-padded.
    ///
    /// # Errors
    /// Returns `ParseError::EmptyInput` for blank text, `InvalidFormat` when the
    /// separator or field count does not match, and the component errors for
    /// dates that do not exist.
    pub fn parse(self, text: &str) -> Result<DateValue, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(self.separator()).collect();
        let [first, second, third] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "{trimmed} does not match {self}"
            )));
        };

        match self.order() {
            FieldOrder::YearMonthDay => DateValue::from_tokens(first, second, third),
            FieldOrder::DayMonthYear => DateValue::from_tokens(third, second, first),
            FieldOrder::MonthDayYear => DateValue::from_tokens(third, first, second),
        }
    }
}

impl FromStr for FormatSpec {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|spec| spec.to_string() == trimmed)
            .ok_or_else(|| FormatError::Unknown(s.to_owned()))
    }
}

impl TryFrom<String> for FormatSpec {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormatSpec> for String {
    fn from(spec: FormatSpec) -> Self {
        spec.to_string()
    }
}
