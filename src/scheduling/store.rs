//! In-memory shift store.
//!
//! The [`ShiftStore`] holds at most one [`Shift`] per `(date, time)` pair.
//! Reads that address a pair with no stored shift get a
//! [`ShiftView::Placeholder`] instead, which cannot be written back; shifts
//! only enter the store through the assignment functions.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::{RosterError, RosterResult};
use crate::models::{MonthContext, Shift, ShiftTime};

/// Result of looking up a shift by its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftView<'a> {
    /// A shift that exists in the store.
    Persisted(&'a Shift),
    /// An empty stand-in for a key with no stored shift.
    Placeholder(Shift),
}

impl ShiftView<'_> {
    /// Returns the shift, stored or synthesized.
    pub fn shift(&self) -> &Shift {
        match self {
            ShiftView::Persisted(shift) => shift,
            ShiftView::Placeholder(shift) => shift,
        }
    }

    /// Returns true if the shift exists in the store.
    pub fn is_persisted(&self) -> bool {
        matches!(self, ShiftView::Persisted(_))
    }
}

/// Collection of shifts keyed by `(date, time)`, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShiftStore {
    shifts: Vec<Shift>,
}

impl ShiftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing shifts.
    ///
    /// Fails with `DuplicateShift` if two shifts share a key and with
    /// `InvalidDate` if a shift is not on a Sunday.
    pub fn from_shifts(shifts: Vec<Shift>) -> RosterResult<Self> {
        for (index, shift) in shifts.iter().enumerate() {
            ensure_sunday(shift.date)?;
            if shifts[..index].iter().any(|s| s.is_at(shift.date, shift.time)) {
                return Err(RosterError::DuplicateShift {
                    date: shift.date,
                    time: shift.time,
                });
            }
        }
        Ok(Self { shifts })
    }

    /// Returns the shift at `(date, time)`, or an empty placeholder.
    ///
    /// # Example
    ///
    /// ```
    /// use sunday_roster::models::ShiftTime;
    /// use sunday_roster::scheduling::ShiftStore;
    /// use chrono::NaiveDate;
    ///
    /// let store = ShiftStore::new();
    /// let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    /// let view = store.get_shift(date, ShiftTime::Morning);
    /// assert!(!view.is_persisted());
    /// assert!(view.shift().is_vacant());
    /// ```
    pub fn get_shift(&self, date: NaiveDate, time: ShiftTime) -> ShiftView<'_> {
        match self.find(date, time) {
            Some(shift) => ShiftView::Persisted(shift),
            None => ShiftView::Placeholder(Shift::empty(date, time)),
        }
    }

    /// Returns the stored shift at `(date, time)`, if any.
    pub fn find(&self, date: NaiveDate, time: ShiftTime) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.is_at(date, time))
    }

    /// Returns the stored shift, failing with `NotFound`.
    pub fn require(&self, date: NaiveDate, time: ShiftTime) -> RosterResult<&Shift> {
        self.find(date, time)
            .ok_or(RosterError::NotFound { date, time })
    }

    pub(crate) fn find_mut(&mut self, date: NaiveDate, time: ShiftTime) -> Option<&mut Shift> {
        self.shifts.iter_mut().find(|s| s.is_at(date, time))
    }

    /// Returns the stored shift at `(date, time)`, creating an empty one first.
    pub(crate) fn entry(&mut self, date: NaiveDate, time: ShiftTime) -> &mut Shift {
        let index = match self.shifts.iter().position(|s| s.is_at(date, time)) {
            Some(index) => index,
            None => {
                self.shifts.push(Shift::empty(date, time));
                self.shifts.len() - 1
            }
        };
        &mut self.shifts[index]
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Shift> {
        self.shifts.iter_mut()
    }

    /// Iterates over stored shifts in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Shift> {
        self.shifts.iter()
    }

    /// Iterates over the stored shifts that fall on the month's Sundays.
    pub fn in_month<'a>(&'a self, month: &'a MonthContext) -> impl Iterator<Item = &'a Shift> {
        self.shifts.iter().filter(move |s| month.contains(s.date))
    }

    /// Returns the number of stored shifts.
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// Returns true if no shift is stored.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Returns the stored shifts as a slice.
    pub fn as_slice(&self) -> &[Shift] {
        &self.shifts
    }

    /// Consumes the store, returning its shifts.
    pub fn into_vec(self) -> Vec<Shift> {
        self.shifts
    }
}

/// Rejects dates that are not Sundays.
pub(crate) fn ensure_sunday(date: NaiveDate) -> RosterResult<()> {
    if date.weekday() == Weekday::Sun {
        Ok(())
    } else {
        Err(RosterError::InvalidDate {
            date,
            message: format!("shifts are only held on Sundays, got a {}", date.weekday()),
        })
    }
}
