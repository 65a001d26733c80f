//! Sunday roster API server.
//!
//! Loads `schedule.yaml` from the directory named by `ROSTER_CONFIG`
//! (default `./config/default`), opens the file store and serves the API.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sunday_roster::api::{AppState, create_router};
use sunday_roster::config::ConfigLoader;
use sunday_roster::messaging::Announcer;
use sunday_roster::persistence::FileStore;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config_dir =
        std::env::var("ROSTER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading configuration from {}", config_dir))?;

    let listen_addr = config.config().server.listen_addr.clone();
    let data_dir = config.config().storage.data_dir.clone();
    info!(
        config_dir = %config_dir,
        data_dir = %data_dir,
        listen_addr = %listen_addr,
        "Configuration loaded"
    );

    let store = FileStore::open(&data_dir)
        .with_context(|| format!("opening data directory {}", data_dir))?;
    let state = AppState::load(config, Arc::new(store), Announcer::default())
        .context("loading roster state")?;
    let (volunteers, shifts) = state
        .read(|roster| (roster.roster().len(), roster.shifts().len()))
        .await;
    info!(volunteers, shifts, "Roster loaded");

    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("binding {}", listen_addr))?;
    info!(listen_addr = %listen_addr, "Sunday roster API listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
