//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Every section carries serde defaults, so an empty source
//! yields a usable configuration.

pub mod cache;
pub mod logging;
pub mod resolver;

use serde::{Deserialize, Serialize};
use tracing::debug;

use self::cache::GroupCacheConfig;
use self::logging::LoggingConfig;
use self::resolver::ResolverConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration files
/// (default.toml + environment overlay + `MOUNTVIEW__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Share merge resolver settings.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Group membership cache settings.
    #[serde(default)]
    pub group_cache: GroupCacheConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with the `config/{env}.toml` overlay and
    /// environment variables prefixed with `MOUNTVIEW__`. Missing files are
    /// not an error.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration from TOML files located in `dir`.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        debug!(dir, env, "Loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MOUNTVIEW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
