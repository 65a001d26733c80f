//! Special-slot designations.
//!
//! Some seats carry an advisory label depending on where the Sunday falls in
//! the month: communion services and the early-arrival seat of the morning
//! shift. Labels only change display text; they never affect whether an
//! assignment is allowed.

use serde::Serialize;

use crate::models::{ShiftTime, SlotPosition};

/// Label attached to a seat by the calendar rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Designation {
    /// Short label shown next to the occupant (e.g. "Ceia").
    pub label: &'static str,
    /// Text shown while the seat is empty.
    pub placeholder: &'static str,
}

const COMMUNION_EVENING: Designation = Designation {
    label: "Ceia",
    placeholder: "Disponível (Ceia)",
};

const COMMUNION_MORNING: Designation = Designation {
    label: "Ceia (08:00)",
    placeholder: "Disponível (Ceia)",
};

const EARLY_ARRIVAL: Designation = Designation {
    label: "08:00",
    placeholder: "Disponível (08:00)",
};

/// Resolves the designation of a seat.
///
/// `week_index` is the zero-based position of the Sunday within the month.
/// Rules are checked in order and the first match wins:
///
/// 1. First Sunday, evening: "Ceia" on every seat.
/// 2. Third Sunday, morning: "Ceia (08:00)" on every seat.
/// 3. Any morning, seat 0: "08:00".
///
/// # Example
///
/// ```
/// use sunday_roster::models::{ShiftTime, SlotPosition};
/// use sunday_roster::scheduling::resolve_designation;
///
/// let seat = SlotPosition::new(1).unwrap();
/// let designation = resolve_designation(0, ShiftTime::Evening, seat).unwrap();
/// assert_eq!(designation.label, "Ceia");
/// assert!(resolve_designation(1, ShiftTime::Evening, seat).is_none());
/// ```
pub fn resolve_designation(
    week_index: usize,
    time: ShiftTime,
    position: SlotPosition,
) -> Option<Designation> {
    match (week_index, time, position.index()) {
        (0, ShiftTime::Evening, _) => Some(COMMUNION_EVENING),
        (2, ShiftTime::Morning, _) => Some(COMMUNION_MORNING),
        (_, ShiftTime::Morning, 0) => Some(EARLY_ARRIVAL),
        _ => None,
    }
}

/// Placeholder for an undesignated empty seat.
pub fn default_placeholder(time: ShiftTime) -> &'static str {
    match time {
        ShiftTime::Morning => "Disponível (08:30)",
        ShiftTime::Evening => "Disponível (17:30)",
    }
}

/// Placeholder shown for an empty seat, designated or not.
pub fn placeholder(week_index: usize, time: ShiftTime, position: SlotPosition) -> &'static str {
    resolve_designation(week_index, time, position)
        .map(|d| d.placeholder)
        .unwrap_or_else(|| default_placeholder(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(index: usize) -> SlotPosition {
        SlotPosition::new(index).unwrap()
    }

    #[test]
    fn test_first_sunday_evening_is_communion_on_every_seat() {
        for position in SlotPosition::ALL {
            let designation = resolve_designation(0, ShiftTime::Evening, position).unwrap();
            assert_eq!(designation.label, "Ceia");
            assert_eq!(designation.placeholder, "Disponível (Ceia)");
        }
    }

    #[test]
    fn test_third_sunday_morning_is_communion_on_every_seat() {
        for position in SlotPosition::ALL {
            let designation = resolve_designation(2, ShiftTime::Morning, position).unwrap();
            assert_eq!(designation.label, "Ceia (08:00)");
            assert_eq!(designation.placeholder, "Disponível (Ceia)");
        }
    }

    #[test]
    fn test_communion_takes_priority_over_early_arrival() {
        let designation = resolve_designation(2, ShiftTime::Morning, seat(0)).unwrap();
        assert_eq!(designation.label, "Ceia (08:00)");
    }

    #[test]
    fn test_morning_first_seat_is_early_arrival() {
        for week in [0, 1, 3, 4] {
            let designation = resolve_designation(week, ShiftTime::Morning, seat(0)).unwrap();
            assert_eq!(designation.label, "08:00");
            assert_eq!(designation.placeholder, "Disponível (08:00)");
        }
    }

    #[test]
    fn test_other_seats_have_no_designation() {
        assert!(resolve_designation(1, ShiftTime::Morning, seat(1)).is_none());
        assert!(resolve_designation(0, ShiftTime::Morning, seat(2)).is_none());
        assert!(resolve_designation(2, ShiftTime::Evening, seat(0)).is_none());
        assert!(resolve_designation(4, ShiftTime::Evening, seat(1)).is_none());
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholder(1, ShiftTime::Morning, seat(1)), "Disponível (08:30)");
        assert_eq!(placeholder(1, ShiftTime::Evening, seat(0)), "Disponível (17:30)");
        assert_eq!(placeholder(1, ShiftTime::Morning, seat(0)), "Disponível (08:00)");
        assert_eq!(placeholder(0, ShiftTime::Evening, seat(2)), "Disponível (Ceia)");
    }
}
