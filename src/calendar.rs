use chrono::{Datelike, Duration, Months};
use serde::{Deserialize, Serialize};

use crate::types::{Day, Month, Year, days_in_month};
use crate::{DateValue, ParseError, prelude::*};

/// The month a calendar popup is showing
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{}{}", "year.label_ja()", "month.label_ja()")]
pub struct ViewMonth {
    year: Year,
    month: Month,
}

impl ViewMonth {
    pub const fn new(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    /// # Errors
    /// Returns `ParseError` if the year or month is out of bounds.
    pub fn from_numbers(year: u16, month: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year: Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    pub const fn of(date: &DateValue) -> Self {
        Self {
            year: date.year_typed(),
            month: date.month_typed(),
        }
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn contains(&self, date: &DateValue) -> bool {
        self.year.get() == date.year() && self.month.get() == date.month()
    }

    pub const fn day_count(&self) -> u8 {
        days_in_month(self.year.get(), self.month.get())
    }

    pub fn first_day(&self) -> DateValue {
        DateValue::from_parts(self.year, self.month, Day::FIRST)
    }

    pub fn last_day(&self) -> DateValue {
        let first = self.first_day();
        first
            .checked_add_days(i64::from(self.day_count() - 1))
            .unwrap_or(first)
    }

    /// Previous month; `None` before January of year 1.
    pub fn prev(&self) -> Option<Self> {
        let date = self.first_day().naive().checked_sub_months(Months::new(1))?;
        DateValue::try_from(date).ok().as_ref().map(Self::of)
    }

    /// Next month; `None` after December of the last supported year.
    pub fn next(&self) -> Option<Self> {
        let date = self.first_day().naive().checked_add_months(Months::new(1))?;
        DateValue::try_from(date).ok().as_ref().map(Self::of)
    }
}

/// One Monday-to-Sunday row of the calendar grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub days: Vec<DateValue>,
}

impl Week {
    pub fn first(&self) -> Option<DateValue> {
        self.days.first().copied()
    }
}

/// Full weeks covering `view`, Monday first. Leading and trailing days
/// belong to the neighbouring months.
pub fn month_weeks(view: ViewMonth) -> Vec<Week> {
    let first = view.first_day().naive();
    let lead = Duration::days(i64::from(first.weekday().num_days_from_monday()));
    let mut day = first.checked_sub_signed(lead).unwrap_or(first);

    let mut weeks = vec![];
    let mut week = vec![];
    while day < first || day.month() == first.month() || day.weekday() != chrono::Weekday::Mon {
        // Days before 0001-01-01 or after 9999-12-31 are simply dropped.
        if let Ok(value) = DateValue::try_from(day) {
            week.push(value);
        }
        if day.weekday() == chrono::Weekday::Sun && !week.is_empty() {
            weeks.push(Week {
                days: std::mem::take(&mut week),
            });
        }
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }
    if !week.is_empty() {
        weeks.push(Week { days: week });
    }
    weeks
}
