//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

use mountview_core::config::logging::LoggingConfig;
use mountview_core::error::AppError;
use mountview_core::result::AppResult;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides `config.level`. Any format other than `"json"` is
/// rendered pretty. Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> AppResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    result.map_err(|e| AppError::internal(format!("Failed to install subscriber: {e}")))
}
