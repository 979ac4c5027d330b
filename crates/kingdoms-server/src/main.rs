//! Kingdoms service binary.
//!
//! Wires configuration, logging, the storage backend, and the HTTP API
//! together, then serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `kingdoms-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Open the configured store (in-memory or `PostgreSQL`)
//! 4. Serve the HTTP API

mod error;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use kingdoms_api::{AppState, start_server};
use kingdoms_core::InMemoryStore;
use kingdoms_core::config::{LogFormat, LoggingConfig, ServiceConfig, StorageBackend};
use kingdoms_db::{PgKingdomStore, PostgresConfig, PostgresPool};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::StartupError;

/// Configuration file looked up in the working directory.
const CONFIG_FILE: &str = "kingdoms-config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, from_file) = load_config().context("loading configuration")?;
    init_tracing(&config.logging);

    info!(
        config_file = from_file.then_some(CONFIG_FILE),
        host = %config.server.host,
        port = config.server.port,
        backend = ?config.storage.backend,
        "kingdoms-server starting"
    );

    run(&config).await.context("kingdoms-server failed")?;

    info!("kingdoms-server stopped");
    Ok(())
}

/// Load `kingdoms-config.yaml` if present, otherwise defaults plus
/// environment overrides. The flag reports whether the file was used.
fn load_config() -> Result<(ServiceConfig, bool), StartupError> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        Ok((ServiceConfig::from_file(path)?, true))
    } else {
        Ok((ServiceConfig::from_env()?, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

/// Open the configured store and serve until shutdown.
async fn run(config: &ServiceConfig) -> Result<(), StartupError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory store; kingdoms are lost on restart");
            let state = Arc::new(AppState::from_store(InMemoryStore::new()));
            start_server(&config.server, state).await?;
        }
        StorageBackend::Postgres => {
            let pool = PostgresPool::connect(&PostgresConfig::from_storage(&config.storage)).await?;
            if config.storage.run_migrations {
                pool.run_migrations().await?;
            }
            let state = Arc::new(AppState::from_store(PgKingdomStore::new(&pool)));
            let served = start_server(&config.server, state).await;
            pool.close().await;
            served?;
        }
    }
    Ok(())
}
