//! Assignment engine.
//!
//! Every function here takes the current collections by reference and
//! returns new ones, leaving the inputs untouched when an error is reported.
//! After any successful call the following hold:
//!
//! - no shift holds the same volunteer twice;
//! - no shift holds more than three volunteers;
//! - every seat is empty or holds an id that is on the roster;
//! - each `(date, time)` pair has at most one shift.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{RosterError, RosterResult};
use crate::models::{Roster, SLOTS_PER_SHIFT, ShiftTime, SlotPosition, Volunteer};

use super::store::{ShiftStore, ensure_sunday};

/// Places a volunteer in a specific seat of a shift.
///
/// The shift is created (all seats empty) if it does not exist yet. If the
/// volunteer already holds a different seat in the same shift, that seat is
/// vacated first, so the call moves the volunteer rather than duplicating
/// them. Whoever held `position` before is replaced. No other shift changes.
///
/// # Errors
///
/// - `InvalidReference` if the volunteer is not on the roster.
/// - `InvalidDate` if `date` is not a Sunday.
///
/// # Example
///
/// ```
/// use sunday_roster::models::{Roster, ShiftTime, SlotPosition, Volunteer};
/// use sunday_roster::scheduling::{ShiftStore, assign};
/// use chrono::NaiveDate;
///
/// let ana = Volunteer::with_id("v1", "Ana", "").unwrap();
/// let roster = Roster::from_volunteers(vec![ana]).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
/// let first = SlotPosition::new(0).unwrap();
/// let second = SlotPosition::new(1).unwrap();
///
/// let empty = ShiftStore::new();
/// let shifts = assign(&roster, &empty, "v1", date, ShiftTime::Morning, first).unwrap();
/// let shifts = assign(&roster, &shifts, "v1", date, ShiftTime::Morning, second).unwrap();
///
/// let shift = shifts.find(date, ShiftTime::Morning).unwrap();
/// assert_eq!(shift.occupant(first), None);
/// assert_eq!(shift.occupant(second), Some("v1"));
/// ```
pub fn assign(
    roster: &Roster,
    shifts: &ShiftStore,
    volunteer_id: &str,
    date: NaiveDate,
    time: ShiftTime,
    position: SlotPosition,
) -> RosterResult<ShiftStore> {
    roster.require(volunteer_id)?;
    ensure_sunday(date)?;

    let mut updated = shifts.clone();
    let shift = updated.entry(date, time);

    if let Some(previous) = shift.position_of(volunteer_id) {
        if previous != position {
            debug!(
                volunteer_id,
                from = previous.index(),
                to = position.index(),
                "Moving volunteer within shift"
            );
            shift.set(previous, None);
        }
    }

    let replaced = shift.occupant(position).map(str::to_string);
    shift.set(position, Some(volunteer_id.to_string()));

    info!(
        volunteer_id,
        %date,
        %time,
        position = position.index(),
        replaced = replaced.as_deref().unwrap_or(""),
        "Volunteer assigned"
    );

    Ok(updated)
}

/// Places a volunteer in the first empty seat of a shift.
///
/// This is the append-style entry point for callers that do not address
/// seats. A volunteer who already holds a seat keeps it and the call
/// succeeds without changes.
///
/// # Errors
///
/// - `InvalidReference` if the volunteer is not on the roster.
/// - `InvalidDate` if `date` is not a Sunday.
/// - `CapacityExceeded` if all three seats are taken by other volunteers.
pub fn add_occupant(
    roster: &Roster,
    shifts: &ShiftStore,
    volunteer_id: &str,
    date: NaiveDate,
    time: ShiftTime,
) -> RosterResult<(ShiftStore, SlotPosition)> {
    roster.require(volunteer_id)?;
    ensure_sunday(date)?;

    let view = shifts.get_shift(date, time);
    let existing = view.shift();
    if let Some(position) = existing.position_of(volunteer_id) {
        return Ok((shifts.clone(), position));
    }
    let position = existing
        .first_vacancy()
        .ok_or(RosterError::CapacityExceeded {
            date,
            time,
            capacity: SLOTS_PER_SHIFT,
        })?;

    let updated = assign(roster, shifts, volunteer_id, date, time, position)?;
    Ok((updated, position))
}

/// Empties one seat of a shift.
///
/// Addressing a shift that does not exist is a no-op, and the shift is kept
/// even when its last seat is emptied. Calling it twice has the same effect
/// as calling it once.
pub fn unassign(
    shifts: &ShiftStore,
    date: NaiveDate,
    time: ShiftTime,
    position: SlotPosition,
) -> ShiftStore {
    let mut updated = shifts.clone();
    match updated.find_mut(date, time) {
        Some(shift) => {
            let removed = shift.occupant(position).map(str::to_string);
            shift.set(position, None);
            info!(
                %date,
                %time,
                position = position.index(),
                removed = removed.as_deref().unwrap_or(""),
                "Seat cleared"
            );
        }
        None => debug!(%date, %time, "Unassign on missing shift ignored"),
    }
    updated
}

/// Removes a volunteer from the roster and from every shift.
///
/// Shifts are never deleted, even when they end up empty. This discards all
/// of the volunteer's assignments, so callers should confirm with the user
/// before invoking it.
///
/// # Errors
///
/// `InvalidReference` if the volunteer is not on the roster.
pub fn remove_volunteer(
    roster: &Roster,
    shifts: &ShiftStore,
    volunteer_id: &str,
) -> RosterResult<(Roster, ShiftStore, Volunteer)> {
    let mut updated_roster = roster.clone();
    let removed = updated_roster
        .remove(volunteer_id)
        .ok_or_else(|| RosterError::InvalidReference {
            volunteer_id: volunteer_id.to_string(),
        })?;

    let mut updated_shifts = shifts.clone();
    let cleared = updated_shifts
        .iter_mut()
        .filter_map(|shift| shift.vacate(volunteer_id).then_some(()))
        .count();

    info!(
        volunteer_id,
        name = %removed.name,
        shifts_cleared = cleared,
        "Volunteer removed"
    );

    Ok((updated_roster, updated_shifts, removed))
}

/// Verifies the roster/shift invariants, reporting the first violation.
///
/// Used when accepting collections from outside the engine (for example
/// when loading stored data).
pub fn check_invariants(roster: &Roster, shifts: &ShiftStore) -> RosterResult<()> {
    for (index, shift) in shifts.iter().enumerate() {
        if shifts.as_slice()[..index]
            .iter()
            .any(|s| s.is_at(shift.date, shift.time))
        {
            return Err(RosterError::DuplicateShift {
                date: shift.date,
                time: shift.time,
            });
        }

        let occupants: Vec<&str> = shift.occupants().collect();
        if occupants.len() > SLOTS_PER_SHIFT {
            return Err(RosterError::CapacityExceeded {
                date: shift.date,
                time: shift.time,
                capacity: SLOTS_PER_SHIFT,
            });
        }
        for (i, id) in occupants.iter().enumerate() {
            if occupants[..i].contains(id) {
                return Err(RosterError::DuplicateOccupant {
                    volunteer_id: id.to_string(),
                    date: shift.date,
                    time: shift.time,
                });
            }
            if !roster.contains(id) {
                return Err(RosterError::InvalidReference {
                    volunteer_id: id.to_string(),
                });
            }
        }
    }
    Ok(())
}
