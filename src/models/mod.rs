//! Core data models for the roster engine.
//!
//! This module contains the domain models used throughout the engine.

mod month;
mod roster;
mod shift;
mod stats;
mod volunteer;

pub use month::MonthContext;
pub use roster::Roster;
pub use shift::{SLOTS_PER_SHIFT, Shift, ShiftTime, SlotPosition, StoredShift};
pub use stats::{QuotaReport, QuotaStatus, VolunteerStats};
pub use volunteer::{Volunteer, normalize_phone};
