use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{DateValue, prelude::*};

/// Inclusive bounds on selectable dates. Either side may be open.
/// When both are set, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[display(fmt = "{}..={}", "Bound(min)", "Bound(max)")]
#[serde(try_from = "RangeRepr", into = "RangeRepr")]
pub struct DateRange {
    min: Option<DateValue>,
    max: Option<DateValue>,
}

/// Renders an open bound as `*`
struct Bound<'a>(&'a Option<DateValue>);

impl std::fmt::Display for Bound<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{date}"),
            None => f.write_str("*"),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RangeRepr {
    #[serde(default)]
    min: Option<DateValue>,
    #[serde(default)]
    max: Option<DateValue>,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Lower bound is after upper bound.
    #[error("Invalid date range: min ({min}) is after max ({max})")]
    InvalidRange { min: DateValue, max: DateValue },

    /// Value lies outside the range.
    #[error("{value} is outside the allowed range {range}")]
    OutOfRange { value: DateValue, range: DateRange },
}

impl DateRange {
    /// Range with no bounds; every date is inside it.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    /// Creates a range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if both bounds are set and min > max.
    pub fn new(min: Option<DateValue>, max: Option<DateValue>) -> Result<Self, RangeError> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(RangeError::InvalidRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    pub const fn min(&self) -> Option<DateValue> {
        self.min
    }

    pub const fn max(&self) -> Option<DateValue> {
        self.max
    }

    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Where `date` falls relative to the range: `Less` below min,
    /// `Greater` above max, `Equal` inside.
    pub fn position(&self, date: &DateValue) -> Ordering {
        match (self.min, self.max) {
            (Some(min), _) if *date < min => Ordering::Less,
            (_, Some(max)) if *date > max => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    pub fn contains(&self, date: &DateValue) -> bool {
        self.position(date) == Ordering::Equal
    }

    /// Moves `date` to the nearest bound when it lies outside.
    pub fn clamp(&self, date: DateValue) -> DateValue {
        match self.position(&date) {
            Ordering::Less => self.min.unwrap_or(date),
            Ordering::Greater => self.max.unwrap_or(date),
            Ordering::Equal => date,
        }
    }

    /// # Errors
    /// Returns `RangeError::OutOfRange` if `date` lies outside.
    pub fn check(&self, date: DateValue) -> Result<DateValue, RangeError> {
        if self.contains(&date) {
            Ok(date)
        } else {
            Err(RangeError::OutOfRange {
                value: date,
                range: *self,
            })
        }
    }
}

impl TryFrom<RangeRepr> for DateRange {
    type Error = RangeError;

    fn try_from(repr: RangeRepr) -> Result<Self, Self::Error> {
        Self::new(repr.min, repr.max)
    }
}

impl From<DateRange> for RangeRepr {
    fn from(range: DateRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> DateValue {
        DateValue::from_ymd(y, m, d).unwrap()
    }

    fn h1_2024() -> DateRange {
        DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 6, 30))).unwrap()
    }

    #[test]
    fn test_new_range_cases() {
        assert!(DateRange::new(None, None).is_ok());
        assert!(DateRange::new(Some(date(2024, 1, 1)), None).is_ok());
        assert!(DateRange::new(None, Some(date(2024, 1, 1))).is_ok());
        assert!(DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 1))).is_ok());

        let result = DateRange::new(Some(date(2024, 6, 1)), Some(date(2024, 1, 1)));
        assert_eq!(
            result,
            Err(RangeError::InvalidRange {
                min: date(2024, 6, 1),
                max: date(2024, 1, 1),
            })
        );
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = h1_2024();
        assert!(range.contains(&date(2024, 1, 1)));
        assert!(range.contains(&date(2024, 6, 30)));
        assert!(range.contains(&date(2024, 3, 15)));
        assert!(!range.contains(&date(2023, 12, 31)));
        assert!(!range.contains(&date(2024, 7, 1)));
    }

    #[test]
    fn test_open_bounds() {
        let from = DateRange::new(Some(date(2024, 1, 1)), None).unwrap();
        assert!(from.contains(&date(9999, 12, 31)));
        assert!(!from.contains(&date(2023, 12, 31)));
        assert!(DateRange::UNBOUNDED.contains(&date(1, 1, 1)));
        assert!(DateRange::default().is_unbounded());
    }

    #[test]
    fn test_clamp() {
        let range = h1_2024();
        assert_eq!(range.clamp(date(2000, 1, 1)), date(2024, 1, 1));
        assert_eq!(range.clamp(date(2030, 1, 1)), date(2024, 6, 30));
        assert_eq!(range.clamp(date(2024, 2, 2)), date(2024, 2, 2));
    }

    #[test]
    fn test_check() {
        let range = h1_2024();
        assert_eq!(range.check(date(2024, 2, 2)), Ok(date(2024, 2, 2)));
        let err = range.check(date(2024, 7, 1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "2024-07-01 is outside the allowed range 2024-01-01..=2024-06-30"
        );
    }

    #[test]
    fn test_display_open_bounds() {
        let range = DateRange::new(None, Some(date(2024, 6, 30))).unwrap();
        assert_eq!(range.to_string(), "*..=2024-06-30");
    }

    #[test]
    fn test_serde_validation() {
        let range: DateRange =
            serde_json::from_str(r#"{"min":"2024-01-01","max":"2024-06-30"}"#).unwrap();
        assert_eq!(range, h1_2024());

        let open: DateRange = serde_json::from_str(r#"{"max":null}"#).unwrap();
        assert!(open.is_unbounded());

        let result: Result<DateRange, _> =
            serde_json::from_str(r#"{"min":"2024-06-01","max":"2024-01-01"}"#);
        assert!(result.is_err());
    }
}
