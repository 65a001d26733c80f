//! Application state for the roster API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ConfigLoader;
use crate::error::RosterResult;
use crate::messaging::Announcer;
use crate::persistence::{self, KeyValueStore};
use crate::scheduling::RosterState;

/// Shared application state.
///
/// The roster state sits behind a single mutex, so mutations are applied
/// one at a time in arrival order.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn KeyValueStore>,
    roster: Arc<Mutex<RosterState>>,
    announcer: Announcer,
}

impl AppState {
    /// Creates the state from already-loaded parts.
    pub fn new(
        config: ConfigLoader,
        store: Arc<dyn KeyValueStore>,
        roster: RosterState,
        announcer: Announcer,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            roster: Arc::new(Mutex::new(roster)),
            announcer,
        }
    }

    /// Creates the state, loading the roster from `store`.
    pub fn load(
        config: ConfigLoader,
        store: Arc<dyn KeyValueStore>,
        announcer: Announcer,
    ) -> RosterResult<Self> {
        let roster = persistence::load_state(store.as_ref())?;
        Ok(Self::new(config, store, roster, announcer))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the blob store.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Returns the message announcer.
    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    /// Runs `read` against the current roster state.
    pub async fn read<T>(&self, read: impl FnOnce(&RosterState) -> T) -> T {
        let guard = self.roster.lock().await;
        read(&guard)
    }

    /// Applies `change` to a copy of the state, persists the copy and then
    /// makes it current. If either step fails the current state is kept.
    pub async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut RosterState) -> RosterResult<T>,
    ) -> RosterResult<T> {
        let mut guard = self.roster.lock().await;
        let mut next = guard.clone();
        let output = change(&mut next)?;
        persistence::save_state(self.store.as_ref(), &next)?;
        *guard = next;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::models::{ShiftTime, SlotPosition};
    use crate::persistence::MemoryStore;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn create_test_state() -> AppState {
        AppState::new(
            ConfigLoader::default(),
            Arc::new(MemoryStore::new()),
            RosterState::new(),
            Announcer::default(),
        )
    }

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_mutate_persists_on_success() {
        let state = create_test_state();
        state
            .mutate(|roster| roster.add_volunteer("Ana", ""))
            .await
            .unwrap();

        assert_eq!(state.read(|roster| roster.roster().len()).await, 1);
        let reloaded = persistence::load_state(state.store()).unwrap();
        assert_eq!(reloaded.roster().len(), 1);
    }

    /// Store whose shift writes can be switched off.
    #[derive(Default)]
    struct ShiftWritesFail {
        inner: MemoryStore,
        failing: AtomicBool,
    }

    impl KeyValueStore for ShiftWritesFail {
        fn load(&self, key: &str) -> RosterResult<Option<String>> {
            self.inner.load(key)
        }

        fn save(&self, key: &str, blob: &str) -> RosterResult<()> {
            if key == persistence::SHIFTS_KEY && self.failing.load(Ordering::SeqCst) {
                return Err(RosterError::Persistence {
                    key: key.to_string(),
                    message: "write refused".to_string(),
                });
            }
            self.inner.save(key, blob)
        }
    }

    #[tokio::test]
    async fn test_failed_save_keeps_memory_and_disk_in_step() {
        let store = Arc::new(ShiftWritesFail::default());
        let state = AppState::new(
            ConfigLoader::default(),
            store.clone(),
            RosterState::new(),
            Announcer::default(),
        );
        let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let ana = state
            .mutate(|roster| roster.add_volunteer("Ana", ""))
            .await
            .unwrap();
        state
            .mutate(|roster| {
                roster
                    .assign(&ana.id, date, ShiftTime::Morning, SlotPosition::new(0).unwrap())
                    .map(|_| ())
            })
            .await
            .unwrap();

        store.failing.store(true, Ordering::SeqCst);
        let result = state
            .mutate(|roster| roster.remove_volunteer(&ana.id))
            .await;
        assert!(matches!(result, Err(RosterError::Persistence { .. })));

        let in_memory = state.read(|roster| roster.clone()).await;
        assert_eq!(in_memory.roster().len(), 1);
        let reloaded = persistence::load_state(store.as_ref()).unwrap();
        assert_eq!(reloaded, in_memory);
    }

    #[tokio::test]
    async fn test_mutate_keeps_state_on_failure() {
        let state = create_test_state();
        let result = state
            .mutate(|roster| roster.remove_volunteer("ghost"))
            .await;

        assert!(matches!(result, Err(RosterError::InvalidReference { .. })));
        assert!(state.store().load(persistence::VOLUNTEERS_KEY).unwrap().is_none());
    }
}
