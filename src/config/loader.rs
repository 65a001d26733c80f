//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading roster
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{RosterError, RosterResult};
use crate::scheduling::QuotaPolicy;

use super::types::ScheduleConfig;

/// Name of the settings file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "schedule.yaml";

/// Loads and provides access to roster configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── schedule.yaml   # Titles, quota minimums, server and storage settings
/// ```
///
/// # Example
///
/// ```no_run
/// use sunday_roster::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Listening on {}", loader.config().server.listen_addr);
/// # Ok::<(), sunday_roster::error::RosterError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ScheduleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if `schedule.yaml` is missing.
    /// - `ConfigParseError` if it is not valid YAML for [`ScheduleConfig`].
    pub fn load<P: AsRef<Path>>(path: P) -> RosterResult<Self> {
        let file = path.as_ref().join(CONFIG_FILE_NAME);
        let config = Self::load_yaml(&file)?;
        info!(path = %file.display(), "Configuration loaded");
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: ScheduleConfig) -> Self {
        Self { config }
    }

    fn load_yaml(path: &Path) -> RosterResult<ScheduleConfig> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| RosterError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| RosterError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Returns the quota policy.
    pub fn quota(&self) -> &QuotaPolicy {
        &self.config.quota
    }
}
