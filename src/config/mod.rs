//! Configuration loading for the roster.
//!
//! This module loads the roster settings (titles, quota minimums, server and
//! storage locations) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use sunday_roster::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Roster: {}", config.config().app_title);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{ScheduleConfig, ServerConfig, StorageConfig};
