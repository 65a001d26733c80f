//! Quota and statistics calculation.
//!
//! Statistics are re-derived from the shifts passed in on every call; nothing
//! is cached, so they cannot drift from the store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{MonthContext, QuotaReport, QuotaStatus, Roster, Shift, VolunteerStats};

/// Minimum assignments per volunteer for a four-Sunday month.
pub const DEFAULT_FOUR_SUNDAY_MINIMUM: usize = 2;

/// Minimum assignments per volunteer for any other month.
pub const DEFAULT_MINIMUM: usize = 3;

/// How many shifts each volunteer is expected to cover in a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaPolicy {
    /// Minimum when the month has exactly four Sundays.
    #[serde(default = "default_four_sunday_minimum")]
    pub four_sunday_minimum: usize,
    /// Minimum for every other month.
    #[serde(default = "default_minimum")]
    pub default_minimum: usize,
}

fn default_four_sunday_minimum() -> usize {
    DEFAULT_FOUR_SUNDAY_MINIMUM
}

fn default_minimum() -> usize {
    DEFAULT_MINIMUM
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            four_sunday_minimum: DEFAULT_FOUR_SUNDAY_MINIMUM,
            default_minimum: DEFAULT_MINIMUM,
        }
    }
}

impl QuotaPolicy {
    /// Returns the minimum for a month.
    pub fn minimum_required(&self, month: &MonthContext) -> usize {
        if month.sunday_count() == 4 {
            self.four_sunday_minimum
        } else {
            self.default_minimum
        }
    }
}

/// Returns the minimum for a month under the default policy.
///
/// # Example
///
/// ```
/// use sunday_roster::models::MonthContext;
/// use sunday_roster::scheduling::minimum_required;
///
/// // February 2026 has four Sundays, June 2024 has five.
/// assert_eq!(minimum_required(&MonthContext::new(2026, 1).unwrap()), 2);
/// assert_eq!(minimum_required(&MonthContext::new(2024, 5).unwrap()), 3);
/// ```
pub fn minimum_required(month: &MonthContext) -> usize {
    QuotaPolicy::default().minimum_required(month)
}

/// Counts, for every roster volunteer, the shifts they hold a seat in.
///
/// The calculation covers exactly the shifts passed in; restricting it to a
/// month is up to the caller (see [`crate::scheduling::ShiftStore::in_month`]).
/// Ids that are not on the roster are ignored. Status is `ok` when the count
/// reaches `minimum`, otherwise `pending`.
pub fn compute_stats<'a, I>(roster: &Roster, shifts: I, minimum: usize) -> QuotaReport
where
    I: IntoIterator<Item = &'a Shift>,
{
    let mut counts: HashMap<&str, usize> =
        roster.iter().map(|v| (v.id.as_str(), 0)).collect();

    for shift in shifts {
        for (index, id) in shift.occupants().enumerate() {
            // A shift counts once per volunteer.
            if shift.occupants().take(index).any(|earlier| earlier == id) {
                continue;
            }
            if let Some(count) = counts.get_mut(id) {
                *count += 1;
            }
        }
    }

    let stats = roster
        .iter()
        .map(|volunteer| {
            let count = counts.get(volunteer.id.as_str()).copied().unwrap_or(0);
            VolunteerStats {
                volunteer_id: volunteer.id.clone(),
                count,
                status: status_for(count, minimum),
            }
        })
        .collect();

    QuotaReport {
        minimum_required: minimum,
        stats,
    }
}

fn status_for(count: usize, minimum: usize) -> QuotaStatus {
    if count >= minimum {
        QuotaStatus::Ok
    } else {
        QuotaStatus::Pending
    }
}
