//! Loading and saving the roster state through a [`KeyValueStore`].
//!
//! Volunteers and shifts are stored under separate keys and each collection
//! is re-serialized in full on every save. Saving is an explicit step the
//! caller takes after a mutation succeeds.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ScheduleConfig;
use crate::error::{RosterError, RosterResult};
use crate::models::{Roster, Shift, StoredShift, Volunteer};
use crate::scheduling::{RosterState, ShiftStore};

use super::store::KeyValueStore;

/// Key of the volunteer list.
pub const VOLUNTEERS_KEY: &str = "volunteers";
/// Key of the shift list.
pub const SHIFTS_KEY: &str = "shifts";
/// Key of the application title.
pub const APP_TITLE_KEY: &str = "appTitle";
/// Key of the team section heading.
pub const TEAM_SECTION_TITLE_KEY: &str = "teamSectionTitle";
/// Key of the notice printed with the schedule.
pub const DASHBOARD_INFO_KEY: &str = "dashboardInfo";

/// Free-text settings edited alongside the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Title of the roster.
    pub app_title: String,
    /// Heading of the team section.
    pub team_section_title: String,
    /// Notice printed with the schedule.
    #[serde(default)]
    pub dashboard_info: String,
}

fn decode_error(key: &str, error: serde_json::Error) -> RosterError {
    RosterError::Persistence {
        key: key.to_string(),
        message: error.to_string(),
    }
}

/// Loads the roster; an absent blob is an empty roster.
///
/// Stored records go through the same checks as new input: blank ids and
/// names are rejected and phones are reduced to digits.
pub fn load_roster(store: &dyn KeyValueStore) -> RosterResult<Roster> {
    match store.load(VOLUNTEERS_KEY)? {
        Some(blob) => {
            let stored: Vec<Volunteer> =
                serde_json::from_str(&blob).map_err(|e| decode_error(VOLUNTEERS_KEY, e))?;
            let volunteers = stored
                .into_iter()
                .map(|v| Volunteer::with_id(v.id, &v.name, &v.phone))
                .collect::<RosterResult<Vec<_>>>()?;
            Roster::from_volunteers(volunteers)
        }
        None => Ok(Roster::new()),
    }
}

/// Loads the shifts; an absent blob is an empty store.
///
/// Older layouts (`volunteerIds` with `""` for empty seats) are accepted.
pub fn load_shifts(store: &dyn KeyValueStore) -> RosterResult<ShiftStore> {
    match store.load(SHIFTS_KEY)? {
        Some(blob) => {
            let stored: Vec<StoredShift> =
                serde_json::from_str(&blob).map_err(|e| decode_error(SHIFTS_KEY, e))?;
            let shifts = stored
                .into_iter()
                .map(Shift::try_from)
                .collect::<RosterResult<Vec<_>>>()?;
            ShiftStore::from_shifts(shifts)
        }
        None => Ok(ShiftStore::new()),
    }
}

/// Saves the roster.
pub fn save_roster(store: &dyn KeyValueStore, roster: &Roster) -> RosterResult<()> {
    let blob = serde_json::to_string(roster).map_err(|e| decode_error(VOLUNTEERS_KEY, e))?;
    store.save(VOLUNTEERS_KEY, &blob)
}

/// Saves the shifts.
pub fn save_shifts(store: &dyn KeyValueStore, shifts: &ShiftStore) -> RosterResult<()> {
    let blob = serde_json::to_string(shifts).map_err(|e| decode_error(SHIFTS_KEY, e))?;
    store.save(SHIFTS_KEY, &blob)
}

/// Loads the roster and shifts and checks the invariants between them.
pub fn load_state(store: &dyn KeyValueStore) -> RosterResult<RosterState> {
    let roster = load_roster(store)?;
    let shifts = load_shifts(store)?;
    info!(
        volunteers = roster.len(),
        shifts = shifts.len(),
        "Roster state loaded"
    );
    RosterState::from_parts(roster, shifts)
}

/// Saves both collections of a state.
///
/// Shifts are written first: a stored shift only ever names volunteers that
/// are still in the stored roster, so a failure between the two writes
/// cannot leave blobs that fail to load. If the roster write fails the
/// previous shifts blob is put back.
pub fn save_state(store: &dyn KeyValueStore, state: &RosterState) -> RosterResult<()> {
    let previous_shifts = store.load(SHIFTS_KEY)?;
    save_shifts(store, state.shifts())?;

    if let Err(error) = save_roster(store, state.roster()) {
        if let Some(blob) = previous_shifts {
            if let Err(restore_error) = store.save(SHIFTS_KEY, &blob) {
                warn!(error = %restore_error, "Could not restore previous shifts");
            }
        }
        return Err(error);
    }
    Ok(())
}

/// Loads the settings, falling back to the configured titles.
pub fn load_settings(store: &dyn KeyValueStore, config: &ScheduleConfig) -> RosterResult<Settings> {
    Ok(Settings {
        app_title: store
            .load(APP_TITLE_KEY)?
            .unwrap_or_else(|| config.app_title.clone()),
        team_section_title: store
            .load(TEAM_SECTION_TITLE_KEY)?
            .unwrap_or_else(|| config.team_section_title.clone()),
        dashboard_info: store.load(DASHBOARD_INFO_KEY)?.unwrap_or_default(),
    })
}

/// Saves the settings, one key per field.
pub fn save_settings(store: &dyn KeyValueStore, settings: &Settings) -> RosterResult<()> {
    store.save(APP_TITLE_KEY, &settings.app_title)?;
    store.save(TEAM_SECTION_TITLE_KEY, &settings.team_section_title)?;
    store.save(DASHBOARD_INFO_KEY, &settings.dashboard_info)
}
