pub mod client;
pub mod facility;
pub mod geo;
pub mod nearby;
pub mod platform;
pub mod position;

use crate::error::{ConfigError, InitializationError};
use crate::geo::DistanceUnit;
use crate::nearby::DEFAULT_MAX_DISTANCE;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, registry};

pub const ENV_VAR_PREFIX: &str = "EWASTE_LOCATOR__";
pub const SETTINGS_FILE: &str = "Settings.toml";

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub facilities: FacilitiesConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Where the facility table comes from. `None` means the bundled dataset.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct FacilitiesConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SearchConfig {
    pub default_max_distance: f64,
    pub default_unit: DistanceUnit,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_distance: DEFAULT_MAX_DISTANCE,
            default_unit: DistanceUnit::Miles,
        }
    }
}

/// Defaults, then `Settings.toml`, then `EWASTE_LOCATOR__*` environment variables.
pub fn config_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(SETTINGS_FILE))
        .merge(Env::prefixed(ENV_VAR_PREFIX).split("__"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    Ok(config_figment().extract::<Config>()?)
}

pub mod error {
    use crate::facility::TableError;
    use thiserror::Error;
    use tracing_subscriber::util::TryInitError;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("failed to load configuration: {0}")]
        Figment(#[from] figment::Error),
    }

    #[derive(Debug, Error)]
    pub enum InitializationError {
        #[error(transparent)]
        Tracing(#[from] TryInitError),
        #[error(transparent)]
        Config(#[from] ConfigError),
        #[error(transparent)]
        Facilities(#[from] TableError),
        #[error(transparent)]
        Io(#[from] std::io::Error),
    }
}

/// Compact console logging filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() -> Result<(), InitializationError> {
    let fmt_layer = Layer::new()
        .compact()
        .with_file(true)
        .with_line_number(true);

    let env_filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    registry()
        .with(env_filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

pub async fn shutdown_listener() {
    let ctrl_c = signal::ctrl_c();
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(name: "signal.ctrlc.received", "received Ctrl+C signal, shutting down"),
        _ = terminate => info!(name: "signal.sigterm.received", "received SIGTERM signal, shutting down"),
    }
}
