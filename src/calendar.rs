//! Calendar utilities.
//!
//! Months are addressed with a zero-based index (0 = January) throughout the
//! crate. The [`CalendarProvider`] trait is the seam the schedule depends on;
//! [`GregorianCalendar`] is the default implementation.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{RosterError, RosterResult};

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Source of the schedulable Sundays of a month.
pub trait CalendarProvider {
    /// Returns every Sunday of the month in ascending order.
    fn sundays(&self, year: i32, month: u32) -> RosterResult<Vec<NaiveDate>>;
}

/// Proleptic Gregorian calendar backed by `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GregorianCalendar;

impl CalendarProvider for GregorianCalendar {
    fn sundays(&self, year: i32, month: u32) -> RosterResult<Vec<NaiveDate>> {
        sundays_in_month(year, month)
    }
}

/// Returns the Sundays of a month, ascending.
///
/// # Example
///
/// ```
/// use sunday_roster::calendar::sundays_in_month;
///
/// // June 2024 starts on a Saturday and has five Sundays.
/// let sundays = sundays_in_month(2024, 5).unwrap();
/// assert_eq!(sundays.len(), 5);
/// assert_eq!(sundays[0].to_string(), "2024-06-02");
/// ```
pub fn sundays_in_month(year: i32, month: u32) -> RosterResult<Vec<NaiveDate>> {
    let first = first_day(year, month)?;
    let offset = (7 - first.weekday().num_days_from_sunday()) % 7;

    let mut sundays = Vec::with_capacity(5);
    let mut day = first.checked_add_days(Days::new(u64::from(offset)));
    while let Some(date) = day {
        if date.month0() != month {
            break;
        }
        sundays.push(date);
        day = date.checked_add_days(Days::new(7));
    }
    Ok(sundays)
}

/// Returns the first day of a zero-based month.
pub(crate) fn first_day(year: i32, month: u32) -> RosterResult<NaiveDate> {
    if month > 11 {
        return Err(RosterError::InvalidMonth { month });
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or(RosterError::InvalidYear { year })
}

/// Formats a date as `dd/mm/yyyy`.
///
/// ```
/// use sunday_roster::calendar::format_date_pt_br;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
/// assert_eq!(format_date_pt_br(date), "02/06/2024");
/// ```
pub fn format_date_pt_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Returns the Portuguese name of a zero-based month.
pub fn month_name(month: u32) -> RosterResult<&'static str> {
    MONTH_NAMES
        .get(month as usize)
        .copied()
        .ok_or(RosterError::InvalidMonth { month })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_month_starting_on_sunday() {
        // 2024-09-01 is a Sunday
        let sundays = sundays_in_month(2024, 8).unwrap();
        assert_eq!(
            sundays,
            vec![
                make_date("2024-09-01"),
                make_date("2024-09-08"),
                make_date("2024-09-15"),
                make_date("2024-09-22"),
                make_date("2024-09-29"),
            ]
        );
    }

    #[test]
    fn test_four_sunday_month() {
        let sundays = sundays_in_month(2026, 1).unwrap();
        assert_eq!(sundays.len(), 4);
        assert_eq!(sundays[0], make_date("2026-02-01"));
        assert_eq!(sundays[3], make_date("2026-02-22"));
    }

    #[test]
    fn test_december_does_not_spill_into_next_year() {
        let sundays = sundays_in_month(2024, 11).unwrap();
        assert_eq!(sundays.last(), Some(&make_date("2024-12-29")));
    }

    #[test]
    fn test_every_month_has_four_or_five_sundays() {
        for year in 2023..=2027 {
            for month in 0..12 {
                let sundays = sundays_in_month(year, month).unwrap();
                assert!((4..=5).contains(&sundays.len()));
                assert!(sundays.iter().all(|d| d.weekday() == Weekday::Sun));
                assert!(sundays.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        assert!(matches!(
            sundays_in_month(2024, 12),
            Err(RosterError::InvalidMonth { month: 12 })
        ));
    }

    #[test]
    fn test_out_of_range_year_names_the_year() {
        assert!(matches!(
            sundays_in_month(999_999, 5),
            Err(RosterError::InvalidYear { year: 999_999 })
        ));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(0).unwrap(), "Janeiro");
        assert_eq!(month_name(2).unwrap(), "Março");
        assert_eq!(month_name(11).unwrap(), "Dezembro");
        assert!(month_name(12).is_err());
    }

    #[test]
    fn test_gregorian_calendar_matches_free_function() {
        let provider = GregorianCalendar;
        assert_eq!(
            provider.sundays(2025, 2).unwrap(),
            sundays_in_month(2025, 2).unwrap()
        );
    }
}
