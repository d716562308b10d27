use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use states_api::{
    api::{create_router, AppState},
    config::{LogFormat, Settings, SettingsLoader, StorageBackend},
    dataset::StatesDataset,
    event_log::EventLog,
    store::{FactStore, InMemoryFactStore, SqliteFactStore},
};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CONFIG_ENV: &str = "STATES_API_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/server.yaml";

/// Initializes the tracing subscriber. `RUST_LOG` wins over the configured filter.
fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    match settings.logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(false),
            )
            .init(),
    }
}

fn open_store(settings: &Settings) -> Result<Arc<dyn FactStore>> {
    let store: Arc<dyn FactStore> = match settings.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory fact store; fun facts will not survive a restart");
            Arc::new(InMemoryFactStore::new())
        }
        StorageBackend::Sqlite => Arc::new(
            SqliteFactStore::open(&settings.storage.database_url).with_context(|| {
                format!("failed to open database '{}'", settings.storage.database_url)
            })?,
        ),
    };
    Ok(store)
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let settings = SettingsLoader::load_or_default(&config_path)
        .and_then(|loader| loader.with_env(|key| std::env::var(key).ok()))
        .with_context(|| format!("failed to load configuration from '{config_path}'"))?
        .into_settings();

    init_logging(&settings);

    let dataset = StatesDataset::load(&settings.data.states_path)?;
    info!(
        states = dataset.len(),
        path = %settings.data.states_path.display(),
        "States dataset loaded"
    );

    let store = open_store(&settings)?;
    info!(backend = ?settings.storage.backend, "Fact store ready");

    let event_log = match &settings.logging.log_dir {
        Some(dir) => EventLog::new(dir),
        None => EventLog::disabled(),
    };

    let state = AppState::new(dataset, store, event_log, settings.responses.clone());
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(address = %addr, "Server running");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
