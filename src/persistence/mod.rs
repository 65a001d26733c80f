//! Persistence of the roster state.
//!
//! Stores implement the [`KeyValueStore`] contract; the functions in this
//! module serialize the roster and shift collections to JSON blobs.

mod codec;
mod store;

pub use codec::{
    APP_TITLE_KEY, DASHBOARD_INFO_KEY, SHIFTS_KEY, Settings, TEAM_SECTION_TITLE_KEY,
    VOLUNTEERS_KEY, load_roster, load_settings, load_shifts, load_state, save_roster,
    save_settings, save_shifts, save_state,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};
