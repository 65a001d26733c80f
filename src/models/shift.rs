//! Shift model and related types.
//!
//! This module defines the [`Shift`] struct, the [`ShiftTime`] enum for the
//! two Sunday services and the [`SlotPosition`] index for the three fixed
//! seats inside a shift.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{RosterError, RosterResult};

/// Number of seats in every shift.
pub const SLOTS_PER_SHIFT: usize = 3;

/// The time of day a shift starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftTime {
    /// The morning service.
    #[serde(rename = "09:00")]
    Morning,
    /// The evening service.
    #[serde(rename = "18:00")]
    Evening,
}

impl ShiftTime {
    /// Both shift times, in the order they happen on a Sunday.
    pub const ALL: [ShiftTime; 2] = [ShiftTime::Morning, ShiftTime::Evening];

    /// Returns the `HH:MM` label of the shift time.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftTime::Morning => "09:00",
            ShiftTime::Evening => "18:00",
        }
    }
}

impl fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftTime {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "09:00" => Ok(ShiftTime::Morning),
            "18:00" => Ok(ShiftTime::Evening),
            other => Err(RosterError::InvalidShiftTime {
                value: other.to_string(),
            }),
        }
    }
}

/// One of the three fixed seats of a shift.
///
/// Positions are stable: position 0 of a morning shift carries the early
/// arrival designation, so a volunteer's position is meaningful.
///
/// # Example
///
/// ```
/// use sunday_roster::models::SlotPosition;
///
/// assert_eq!(SlotPosition::new(2).unwrap().index(), 2);
/// assert!(SlotPosition::new(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SlotPosition(usize);

impl SlotPosition {
    /// All positions of a shift, in order.
    pub const ALL: [SlotPosition; SLOTS_PER_SHIFT] =
        [SlotPosition(0), SlotPosition(1), SlotPosition(2)];

    /// Creates a position, rejecting indices outside the shift.
    pub fn new(index: usize) -> RosterResult<Self> {
        if index < SLOTS_PER_SHIFT {
            Ok(Self(index))
        } else {
            Err(RosterError::InvalidSlot { position: index })
        }
    }

    /// Returns the zero-based index of the position.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for SlotPosition {
    type Error = RosterError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SlotPosition> for usize {
    fn from(position: SlotPosition) -> Self {
        position.0
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents the volunteers serving one Sunday service.
///
/// A shift is identified by its `(date, time)` pair and always has exactly
/// [`SLOTS_PER_SHIFT`] seats; an empty seat is `None`. Seats hold volunteer
/// ids only, never copies of the volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredShift")]
pub struct Shift {
    /// Identifier derived from the natural key (`<date>-<time>`).
    pub id: String,
    /// The Sunday the shift happens on.
    pub date: NaiveDate,
    /// The service time.
    pub time: ShiftTime,
    slots: [Option<String>; SLOTS_PER_SHIFT],
}

impl Shift {
    /// Creates a shift with every seat empty.
    ///
    /// # Example
    ///
    /// ```
    /// use sunday_roster::models::{Shift, ShiftTime};
    /// use chrono::NaiveDate;
    ///
    /// let shift = Shift::empty(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(), ShiftTime::Morning);
    /// assert_eq!(shift.id, "2024-06-02-09:00");
    /// assert_eq!(shift.occupied_count(), 0);
    /// ```
    pub fn empty(date: NaiveDate, time: ShiftTime) -> Self {
        Self {
            id: Self::key_id(date, time),
            date,
            time,
            slots: Default::default(),
        }
    }

    /// Builds the identifier used for the shift at `(date, time)`.
    pub fn key_id(date: NaiveDate, time: ShiftTime) -> String {
        format!("{}-{}", date.format("%Y-%m-%d"), time)
    }

    /// Returns true if the shift is keyed by `(date, time)`.
    pub fn is_at(&self, date: NaiveDate, time: ShiftTime) -> bool {
        self.date == date && self.time == time
    }

    /// Returns the seats of the shift.
    pub fn slots(&self) -> &[Option<String>; SLOTS_PER_SHIFT] {
        &self.slots
    }

    /// Returns the volunteer id at `position`, if any.
    pub fn occupant(&self, position: SlotPosition) -> Option<&str> {
        self.slots[position.index()].as_deref()
    }

    /// Iterates over the ids of every occupied seat, in position order.
    pub fn occupants(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|slot| slot.as_deref())
    }

    /// Returns the number of occupied seats.
    pub fn occupied_count(&self) -> usize {
        self.occupants().count()
    }

    /// Returns true if every seat is taken.
    pub fn is_full(&self) -> bool {
        self.occupied_count() == SLOTS_PER_SHIFT
    }

    /// Returns true if no seat is taken.
    pub fn is_vacant(&self) -> bool {
        self.occupied_count() == 0
    }

    /// Returns the position held by `volunteer_id`, if any.
    pub fn position_of(&self, volunteer_id: &str) -> Option<SlotPosition> {
        self.slots
            .iter()
            .position(|slot| slot.as_deref() == Some(volunteer_id))
            .map(SlotPosition)
    }

    /// Returns true if `volunteer_id` holds any seat.
    pub fn contains(&self, volunteer_id: &str) -> bool {
        self.position_of(volunteer_id).is_some()
    }

    /// Returns the first empty seat, if any.
    pub fn first_vacancy(&self) -> Option<SlotPosition> {
        self.slots.iter().position(Option::is_none).map(SlotPosition)
    }

    pub(crate) fn set(&mut self, position: SlotPosition, volunteer_id: Option<String>) {
        self.slots[position.index()] = volunteer_id;
    }

    /// Empties every seat holding `volunteer_id`; returns true if any was held.
    pub(crate) fn vacate(&mut self, volunteer_id: &str) -> bool {
        let mut vacated = false;
        for slot in self.slots.iter_mut() {
            if slot.as_deref() == Some(volunteer_id) {
                *slot = None;
                vacated = true;
            }
        }
        vacated
    }

    /// Returns true if the shift date is a Sunday.
    pub fn is_on_sunday(&self) -> bool {
        self.date.weekday() == Weekday::Sun
    }
}

/// Shift layout as found in stored data.
///
/// Older records keep the seats under `volunteerIds`, use `""` for an empty
/// seat and may hold fewer than three entries. Converting into a [`Shift`]
/// pads the seats, rejects more than three occupants and rejects the same
/// volunteer twice.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredShift {
    /// Stored identifier; regenerated from the key when absent or empty.
    #[serde(default)]
    pub id: String,
    /// The Sunday of the shift.
    pub date: NaiveDate,
    /// The service time.
    pub time: ShiftTime,
    /// Seats in stored order.
    #[serde(alias = "volunteerIds", default)]
    pub slots: Vec<Option<String>>,
}

impl TryFrom<StoredShift> for Shift {
    type Error = RosterError;

    fn try_from(stored: StoredShift) -> Result<Self, Self::Error> {
        let mut shift = Shift::empty(stored.date, stored.time);
        if !stored.id.is_empty() {
            shift.id = stored.id;
        }

        let occupants: Vec<(usize, String)> = stored
            .slots
            .into_iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.filter(|id| !id.is_empty()).map(|id| (index, id)))
            .collect();

        if occupants.len() > SLOTS_PER_SHIFT {
            return Err(RosterError::CapacityExceeded {
                date: shift.date,
                time: shift.time,
                capacity: SLOTS_PER_SHIFT,
            });
        }

        // Occupants past the third seat are compacted into the free seats.
        let mut overflow = Vec::new();
        for (index, id) in occupants {
            if shift.contains(&id) || overflow.contains(&id) {
                return Err(RosterError::DuplicateOccupant {
                    volunteer_id: id,
                    date: shift.date,
                    time: shift.time,
                });
            }
            match SlotPosition::new(index) {
                Ok(position) => shift.set(position, Some(id)),
                Err(_) => overflow.push(id),
            }
        }
        for id in overflow {
            if let Some(position) = shift.first_vacancy() {
                shift.set(position, Some(id));
            }
        }

        Ok(shift)
    }
}
