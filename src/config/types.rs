//! Configuration types for the roster.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `schedule.yaml`.

use serde::Deserialize;

use crate::scheduling::QuotaPolicy;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Address the API listens on (e.g. "127.0.0.1:3000").
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON blob per storage key.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Top-level contents of `schedule.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleConfig {
    /// Title used when no title has been saved yet.
    #[serde(default = "default_app_title")]
    pub app_title: String,
    /// Heading of the team section used when none has been saved yet.
    #[serde(default = "default_team_section_title")]
    pub team_section_title: String,
    /// Monthly quota minimums.
    #[serde(default)]
    pub quota: QuotaPolicy,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            app_title: default_app_title(),
            team_section_title: default_team_section_title(),
            quota: QuotaPolicy::default(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

fn default_app_title() -> String {
    "Voluntários do Domingo".to_string()
}

fn default_team_section_title() -> String {
    "Diáconos".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_data_dir() -> String {
    "./data".to_string()
}
