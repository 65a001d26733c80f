//! Read models for presenting a month's schedule.
//!
//! These types combine the store, the roster and the designation rules into
//! plain serializable data. Building them never mutates anything.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::format_date_pt_br;
use crate::models::{MonthContext, Roster, SLOTS_PER_SHIFT, Shift, ShiftTime, SlotPosition};

use super::designation::{placeholder, resolve_designation};
use super::store::ShiftStore;

/// One seat as shown in the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    /// The seat index.
    pub position: SlotPosition,
    /// The occupant's id, if the seat is taken.
    pub volunteer_id: Option<String>,
    /// The occupant's name, if the seat is taken.
    pub volunteer_name: Option<String>,
    /// Advisory label from the designation rules.
    pub designation: Option<&'static str>,
    /// Text for the seat while it is empty.
    pub placeholder: &'static str,
}

/// One shift of a Sunday as shown in the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftSummary {
    /// The service time.
    pub time: ShiftTime,
    /// Whether the shift exists in the store.
    pub persisted: bool,
    /// Number of taken seats.
    pub occupied_count: usize,
    /// Number of seats.
    pub capacity: usize,
    /// The seats in position order.
    pub slots: Vec<SlotView>,
}

/// A Sunday and its two shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SundaySchedule {
    /// The Sunday.
    pub date: NaiveDate,
    /// The date as `dd/mm/yyyy`.
    pub date_label: String,
    /// Zero-based position of the Sunday in the month.
    pub week_index: usize,
    /// Morning and evening shifts.
    pub shifts: Vec<ShiftSummary>,
}

/// The full schedule of a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSchedule {
    /// The calendar year.
    pub year: i32,
    /// Zero-based month.
    pub month: u32,
    /// Label such as `Junho 2024`.
    pub label: String,
    /// Quota minimum for the month.
    pub minimum_required: usize,
    /// One entry per Sunday.
    pub sundays: Vec<SundaySchedule>,
}

/// A volunteer offered for a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// The volunteer's id.
    pub volunteer_id: String,
    /// The volunteer's name.
    pub name: String,
    /// The volunteer already holds this seat.
    pub selected: bool,
    /// The volunteer holds another seat of the same shift.
    pub disabled: bool,
}

/// Builds the schedule of a month.
pub fn month_schedule(
    month: &MonthContext,
    roster: &Roster,
    shifts: &ShiftStore,
    minimum_required: usize,
) -> MonthSchedule {
    let sundays = month
        .sundays
        .iter()
        .enumerate()
        .map(|(week_index, &date)| SundaySchedule {
            date,
            date_label: format_date_pt_br(date),
            week_index,
            shifts: ShiftTime::ALL
                .iter()
                .map(|&time| {
                    let view = shifts.get_shift(date, time);
                    summarize(view.shift(), view.is_persisted(), week_index, roster)
                })
                .collect(),
        })
        .collect();

    MonthSchedule {
        year: month.year,
        month: month.month,
        label: month.label(),
        minimum_required,
        sundays,
    }
}

fn summarize(shift: &Shift, persisted: bool, week_index: usize, roster: &Roster) -> ShiftSummary {
    let slots = SlotPosition::ALL
        .iter()
        .map(|&position| {
            let volunteer = shift.occupant(position).and_then(|id| roster.get(id));
            SlotView {
                position,
                volunteer_id: volunteer.map(|v| v.id.clone()),
                volunteer_name: volunteer.map(|v| v.name.clone()),
                designation: resolve_designation(week_index, shift.time, position)
                    .map(|d| d.label),
                placeholder: placeholder(week_index, shift.time, position),
            }
        })
        .collect::<Vec<_>>();

    ShiftSummary {
        time: shift.time,
        persisted,
        occupied_count: slots.iter().filter(|s| s.volunteer_id.is_some()).count(),
        capacity: SLOTS_PER_SHIFT,
        slots,
    }
}

/// Lists every roster volunteer as a candidate for one seat.
///
/// A volunteer sitting in a different seat of the same shift is disabled;
/// picking them there would move them, which the seat picker does not offer.
pub fn slot_candidates(
    roster: &Roster,
    shifts: &ShiftStore,
    date: NaiveDate,
    time: ShiftTime,
    position: SlotPosition,
) -> Vec<Candidate> {
    let view = shifts.get_shift(date, time);
    let shift = view.shift();
    roster
        .iter()
        .map(|volunteer| {
            let held = shift.position_of(&volunteer.id);
            Candidate {
                volunteer_id: volunteer.id.clone(),
                name: volunteer.name.clone(),
                selected: held == Some(position),
                disabled: held.is_some_and(|p| p != position),
            }
        })
        .collect()
}

/// Returns the names of a shift's volunteers, in seat order.
pub fn volunteer_names(roster: &Roster, shift: &Shift) -> Vec<String> {
    shift
        .occupants()
        .filter_map(|id| roster.get(id))
        .map(|v| v.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Volunteer;
    use crate::scheduling::assign;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn seat(index: usize) -> SlotPosition {
        SlotPosition::new(index).unwrap()
    }

    fn roster() -> Roster {
        Roster::from_volunteers(vec![
            Volunteer::with_id("v1", "Ana", "").unwrap(),
            Volunteer::with_id("v2", "Bruno", "").unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_month_schedule_covers_every_sunday_and_time() {
        let june = MonthContext::new(2024, 5).unwrap();
        let schedule = month_schedule(&june, &roster(), &ShiftStore::new(), 3);

        assert_eq!(schedule.label, "Junho 2024");
        assert_eq!(schedule.sundays.len(), 5);
        assert_eq!(schedule.sundays[0].date_label, "02/06/2024");
        for sunday in &schedule.sundays {
            assert_eq!(sunday.shifts.len(), 2);
            for shift in &sunday.shifts {
                assert!(!shift.persisted);
                assert_eq!(shift.slots.len(), 3);
                assert_eq!(shift.occupied_count, 0);
            }
        }
    }

    #[test]
    fn test_month_schedule_applies_designations() {
        let june = MonthContext::new(2024, 5).unwrap();
        let schedule = month_schedule(&june, &roster(), &ShiftStore::new(), 3);

        let first_evening = &schedule.sundays[0].shifts[1];
        assert!(first_evening.slots.iter().all(|s| s.designation == Some("Ceia")));

        let second_morning = &schedule.sundays[1].shifts[0];
        assert_eq!(second_morning.slots[0].designation, Some("08:00"));
        assert_eq!(second_morning.slots[1].placeholder, "Disponível (08:30)");

        let third_morning = &schedule.sundays[2].shifts[0];
        assert!(third_morning.slots.iter().all(|s| s.placeholder == "Disponível (Ceia)"));
    }

    #[test]
    fn test_month_schedule_shows_occupants() {
        let roster = roster();
        let date = make_date("2024-06-09");
        let empty = ShiftStore::new();
        let shifts = assign(&roster, &empty, "v2", date, ShiftTime::Evening, seat(1)).unwrap();

        let june = MonthContext::new(2024, 5).unwrap();
        let schedule = month_schedule(&june, &roster, &shifts, 3);
        let evening = &schedule.sundays[1].shifts[1];

        assert!(evening.persisted);
        assert_eq!(evening.occupied_count, 1);
        assert_eq!(evening.slots[1].volunteer_name.as_deref(), Some("Bruno"));
        assert_eq!(evening.slots[0].volunteer_name, None);
    }

    #[test]
    fn test_slot_candidates_disable_volunteers_in_other_seats() {
        let roster = roster();
        let date = make_date("2024-06-02");
        let empty = ShiftStore::new();
        let shifts = assign(&roster, &empty, "v1", date, ShiftTime::Morning, seat(0)).unwrap();

        let for_seat_one = slot_candidates(&roster, &shifts, date, ShiftTime::Morning, seat(1));
        assert!(for_seat_one[0].disabled);
        assert!(!for_seat_one[0].selected);
        assert!(!for_seat_one[1].disabled);

        let for_seat_zero = slot_candidates(&roster, &shifts, date, ShiftTime::Morning, seat(0));
        assert!(for_seat_zero[0].selected);
        assert!(!for_seat_zero[0].disabled);
    }

    #[test]
    fn test_volunteer_names_in_seat_order() {
        let roster = roster();
        let date = make_date("2024-06-02");
        let empty = ShiftStore::new();
        let shifts = assign(&roster, &empty, "v1", date, ShiftTime::Morning, seat(2)).unwrap();
        let shifts = assign(&roster, &shifts, "v2", date, ShiftTime::Morning, seat(0)).unwrap();

        let shift = shifts.find(date, ShiftTime::Morning).unwrap();
        assert_eq!(volunteer_names(&roster, shift), vec!["Bruno", "Ana"]);
    }
}
