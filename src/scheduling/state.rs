//! Explicit roster state.
//!
//! [`RosterState`] owns the roster and the shift store and is the single
//! writer for both. Each mutating method runs one engine operation and swaps
//! in the result only when it succeeds. Persisting the new state is the
//! caller's job (see [`crate::persistence::save_state`]).

use chrono::NaiveDate;

use crate::error::RosterResult;
use crate::models::{
    MonthContext, QuotaReport, Roster, Shift, ShiftTime, SlotPosition, Volunteer,
};

use super::assignment::{add_occupant, assign, check_invariants, remove_volunteer, unassign};
use super::quota::{QuotaPolicy, compute_stats};
use super::store::{ShiftStore, ShiftView};
use super::view::{Candidate, MonthSchedule, month_schedule, slot_candidates, volunteer_names};

/// The roster and its shifts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterState {
    roster: Roster,
    shifts: ShiftStore,
}

impl RosterState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from loaded collections, checking every invariant.
    pub fn from_parts(roster: Roster, shifts: ShiftStore) -> RosterResult<Self> {
        check_invariants(&roster, &shifts)?;
        Ok(Self { roster, shifts })
    }

    /// Returns the roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the shift store.
    pub fn shifts(&self) -> &ShiftStore {
        &self.shifts
    }

    /// Registers a new volunteer.
    pub fn add_volunteer(&mut self, name: &str, phone: &str) -> RosterResult<Volunteer> {
        let volunteer = Volunteer::new(name, phone)?;
        self.roster.add(volunteer.clone())?;
        Ok(volunteer)
    }

    /// Edits a volunteer's name and phone.
    pub fn update_volunteer(
        &mut self,
        id: &str,
        name: &str,
        phone: &str,
    ) -> RosterResult<Volunteer> {
        self.roster.update(id, name, phone).cloned()
    }

    /// Removes a volunteer and every seat they hold.
    pub fn remove_volunteer(&mut self, id: &str) -> RosterResult<Volunteer> {
        let (roster, shifts, removed) = remove_volunteer(&self.roster, &self.shifts, id)?;
        self.roster = roster;
        self.shifts = shifts;
        Ok(removed)
    }

    /// Places a volunteer in a seat; see [`assign`].
    pub fn assign(
        &mut self,
        volunteer_id: &str,
        date: NaiveDate,
        time: ShiftTime,
        position: SlotPosition,
    ) -> RosterResult<&Shift> {
        self.shifts = assign(&self.roster, &self.shifts, volunteer_id, date, time, position)?;
        self.shifts.require(date, time)
    }

    /// Places a volunteer in the first free seat; see [`add_occupant`].
    pub fn add_occupant(
        &mut self,
        volunteer_id: &str,
        date: NaiveDate,
        time: ShiftTime,
    ) -> RosterResult<SlotPosition> {
        let (shifts, position) =
            add_occupant(&self.roster, &self.shifts, volunteer_id, date, time)?;
        self.shifts = shifts;
        Ok(position)
    }

    /// Empties a seat; returns the shift if it exists.
    pub fn unassign(
        &mut self,
        date: NaiveDate,
        time: ShiftTime,
        position: SlotPosition,
    ) -> Option<&Shift> {
        self.shifts = unassign(&self.shifts, date, time, position);
        self.shifts.find(date, time)
    }

    /// Returns the shift at `(date, time)` or a placeholder.
    pub fn get_shift(&self, date: NaiveDate, time: ShiftTime) -> ShiftView<'_> {
        self.shifts.get_shift(date, time)
    }

    /// Quota report over the shifts of one month.
    pub fn month_stats(&self, month: &MonthContext, policy: &QuotaPolicy) -> QuotaReport {
        compute_stats(
            &self.roster,
            self.shifts.in_month(month),
            policy.minimum_required(month),
        )
    }

    /// Schedule read model of one month.
    pub fn month_schedule(&self, month: &MonthContext, policy: &QuotaPolicy) -> MonthSchedule {
        month_schedule(month, &self.roster, &self.shifts, policy.minimum_required(month))
    }

    /// Volunteers that can be offered for a seat.
    pub fn candidates(
        &self,
        date: NaiveDate,
        time: ShiftTime,
        position: SlotPosition,
    ) -> Vec<Candidate> {
        slot_candidates(&self.roster, &self.shifts, date, time, position)
    }

    /// Names of the volunteers in a shift; empty if the shift does not exist.
    pub fn shift_volunteer_names(&self, date: NaiveDate, time: ShiftTime) -> Vec<String> {
        self.shifts
            .find(date, time)
            .map(|shift| volunteer_names(&self.roster, shift))
            .unwrap_or_default()
    }
}
