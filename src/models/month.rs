//! Month context model.
//!
//! A [`MonthContext`] fixes the active month: its Sundays decide which shifts
//! can be addressed, the week index used by the designation rules and the
//! quota minimum.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{self, CalendarProvider, GregorianCalendar};
use crate::error::{RosterError, RosterResult};

/// The active month and its Sundays.
///
/// # Example
///
/// ```
/// use sunday_roster::models::MonthContext;
///
/// let june = MonthContext::new(2024, 5).unwrap();
/// assert_eq!(june.sunday_count(), 5);
/// assert_eq!(june.label(), "Junho 2024");
///
/// let july = june.offset(1).unwrap();
/// assert_eq!((july.year, july.month), (2024, 6));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthContext {
    /// The calendar year.
    pub year: i32,
    /// Zero-based month (0 = January).
    pub month: u32,
    /// Every Sunday of the month, ascending.
    pub sundays: Vec<NaiveDate>,
}

impl MonthContext {
    /// Builds the context for a month using the Gregorian calendar.
    pub fn new(year: i32, month: u32) -> RosterResult<Self> {
        Self::with_calendar(&GregorianCalendar, year, month)
    }

    /// Builds the context for a month using a specific calendar provider.
    pub fn with_calendar(
        calendar: &dyn CalendarProvider,
        year: i32,
        month: u32,
    ) -> RosterResult<Self> {
        let sundays = calendar.sundays(year, month)?;
        Ok(Self {
            year,
            month,
            sundays,
        })
    }

    /// Builds the context of the month containing `date`.
    pub fn containing(date: NaiveDate) -> RosterResult<Self> {
        Self::new(date.year(), date.month0())
    }

    /// Returns the context `months` away from this one (negative goes back).
    pub fn offset(&self, months: i32) -> RosterResult<Self> {
        let first = calendar::first_day(self.year, self.month)?;
        let shifted = if months >= 0 {
            first.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            first.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        let shifted = shifted.ok_or(RosterError::InvalidYear { year: self.year })?;
        Self::containing(shifted)
    }

    /// Returns the number of Sundays in the month.
    pub fn sunday_count(&self) -> usize {
        self.sundays.len()
    }

    /// Returns the position of `date` among the month's Sundays.
    pub fn week_index(&self, date: NaiveDate) -> Option<usize> {
        self.sundays.iter().position(|sunday| *sunday == date)
    }

    /// Returns true if `date` is one of the month's Sundays.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.week_index(date).is_some()
    }

    /// Returns the Portuguese month name.
    pub fn name(&self) -> &'static str {
        calendar::month_name(self.month).unwrap_or_default()
    }

    /// Returns a label such as `Junho 2024`.
    pub fn label(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}
