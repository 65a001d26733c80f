//! Shift assignment and quota engine.
//!
//! This module contains the designation rules for special seats, the shift
//! store, the assignment operations that keep the roster invariants, the
//! quota calculator and the schedule read models.

mod assignment;
mod designation;
mod quota;
mod state;
mod store;
mod view;

pub use assignment::{add_occupant, assign, check_invariants, remove_volunteer, unassign};
pub use designation::{Designation, default_placeholder, placeholder, resolve_designation};
pub use quota::{
    DEFAULT_FOUR_SUNDAY_MINIMUM, DEFAULT_MINIMUM, QuotaPolicy, compute_stats, minimum_required,
};
pub use state::RosterState;
pub use store::{ShiftStore, ShiftView};
pub use view::{
    Candidate, MonthSchedule, ShiftSummary, SlotView, SundaySchedule, month_schedule,
    slot_candidates, volunteer_names,
};
