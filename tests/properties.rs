//! Property tests for the roster engine.
//!
//! Random sequences of assignments, clears and removals must keep the
//! roster and shift store consistent.

use chrono::NaiveDate;
use proptest::prelude::*;

use sunday_roster::models::{MonthContext, QuotaStatus, SLOTS_PER_SHIFT, ShiftTime, SlotPosition};
use sunday_roster::scheduling::{RosterState, check_invariants, compute_stats, unassign};

const VOLUNTEERS: usize = 5;

#[derive(Debug, Clone)]
enum Op {
    Assign {
        volunteer: usize,
        sunday: usize,
        evening: bool,
        position: usize,
    },
    AddOccupant {
        volunteer: usize,
        sunday: usize,
        evening: bool,
    },
    Unassign {
        sunday: usize,
        evening: bool,
        position: usize,
    },
    Remove {
        volunteer: usize,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..VOLUNTEERS, 0..5usize, any::<bool>(), 0..SLOTS_PER_SHIFT).prop_map(
            |(volunteer, sunday, evening, position)| Op::Assign {
                volunteer,
                sunday,
                evening,
                position,
            }
        ),
        2 => (0..VOLUNTEERS, 0..5usize, any::<bool>()).prop_map(
            |(volunteer, sunday, evening)| Op::AddOccupant { volunteer, sunday, evening }
        ),
        2 => (0..5usize, any::<bool>(), 0..SLOTS_PER_SHIFT).prop_map(
            |(sunday, evening, position)| Op::Unassign { sunday, evening, position }
        ),
        1 => (0..VOLUNTEERS).prop_map(|volunteer| Op::Remove { volunteer }),
    ]
}

fn june() -> MonthContext {
    MonthContext::new(2024, 5).unwrap()
}

fn time(evening: bool) -> ShiftTime {
    if evening { ShiftTime::Evening } else { ShiftTime::Morning }
}

fn seeded_state() -> (RosterState, Vec<String>) {
    let mut state = RosterState::new();
    let ids = (0..VOLUNTEERS)
        .map(|i| state.add_volunteer(&format!("V{}", i), "").unwrap().id)
        .collect();
    (state, ids)
}

fn apply(state: &mut RosterState, ids: &[String], sundays: &[NaiveDate], op: &Op) {
    // Failures are expected (removed volunteers, full shifts); they must
    // leave the state untouched, which the invariant check covers.
    let before = state.clone();
    let result = match *op {
        Op::Assign { volunteer, sunday, evening, position } => state
            .assign(
                &ids[volunteer],
                sundays[sunday],
                time(evening),
                SlotPosition::new(position).unwrap(),
            )
            .map(|_| ()),
        Op::AddOccupant { volunteer, sunday, evening } => state
            .add_occupant(&ids[volunteer], sundays[sunday], time(evening))
            .map(|_| ()),
        Op::Unassign { sunday, evening, position } => {
            state.unassign(sundays[sunday], time(evening), SlotPosition::new(position).unwrap());
            Ok(())
        }
        Op::Remove { volunteer } => state.remove_volunteer(&ids[volunteer]).map(|_| ()),
    };
    if result.is_err() {
        assert_eq!(*state, before);
    }
}

proptest! {
    #[test]
    fn prop_operations_preserve_invariants(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let (mut state, ids) = seeded_state();
        let month = june();

        for op in &ops {
            apply(&mut state, &ids, &month.sundays, op);

            prop_assert!(check_invariants(state.roster(), state.shifts()).is_ok());
            for shift in state.shifts().iter() {
                prop_assert!(shift.occupied_count() <= SLOTS_PER_SHIFT);
                let mut seen: Vec<&str> = shift.occupants().collect();
                let total = seen.len();
                seen.sort_unstable();
                seen.dedup();
                prop_assert_eq!(seen.len(), total);
                for id in shift.occupants() {
                    prop_assert!(state.roster().contains(id));
                }
            }
        }
    }

    #[test]
    fn prop_removal_clears_every_seat_and_keeps_shifts(
        ops in prop::collection::vec(op_strategy(), 1..40),
        target in 0..VOLUNTEERS,
    ) {
        let (mut state, ids) = seeded_state();
        let month = june();
        for op in &ops {
            apply(&mut state, &ids, &month.sundays, op);
        }
        if !state.roster().contains(&ids[target]) {
            return Ok(());
        }

        let shift_count = state.shifts().len();
        state.remove_volunteer(&ids[target]).unwrap();

        prop_assert_eq!(state.shifts().len(), shift_count);
        prop_assert!(state.shifts().iter().all(|shift| !shift.contains(&ids[target])));
    }

    #[test]
    fn prop_unassign_is_idempotent(
        ops in prop::collection::vec(op_strategy(), 0..40),
        sunday in 0..5usize,
        evening in any::<bool>(),
        position in 0..SLOTS_PER_SHIFT,
    ) {
        let (mut state, ids) = seeded_state();
        let month = june();
        for op in &ops {
            apply(&mut state, &ids, &month.sundays, op);
        }

        let position = SlotPosition::new(position).unwrap();
        let date = month.sundays[sunday];
        let once = unassign(state.shifts(), date, time(evening), position);
        let twice = unassign(&once, date, time(evening), position);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_assignment_never_lowers_a_count(
        ops in prop::collection::vec(op_strategy(), 0..40),
        volunteer in 0..VOLUNTEERS,
        sunday in 0..5usize,
        evening in any::<bool>(),
        position in 0..SLOTS_PER_SHIFT,
    ) {
        let (mut state, ids) = seeded_state();
        let month = june();
        for op in &ops {
            apply(&mut state, &ids, &month.sundays, op);
        }
        if !state.roster().contains(&ids[volunteer]) {
            return Ok(());
        }

        let minimum = 3;
        let before = compute_stats(state.roster(), state.shifts().in_month(&month), minimum);
        state
            .assign(
                &ids[volunteer],
                month.sundays[sunday],
                time(evening),
                SlotPosition::new(position).unwrap(),
            )
            .unwrap();
        let after = compute_stats(state.roster(), state.shifts().in_month(&month), minimum);

        let count_before = before.get(&ids[volunteer]).unwrap().count;
        let after_stats = after.get(&ids[volunteer]).unwrap();
        prop_assert!(after_stats.count >= count_before);
        prop_assert_eq!(
            after_stats.status == QuotaStatus::Ok,
            after_stats.count >= minimum
        );
    }
}
