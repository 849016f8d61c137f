//! Group membership cache configuration.

use serde::{Deserialize, Serialize};

/// In-memory cache in front of the group membership lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCacheConfig {
    /// Whether group memberships are cached at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Maximum number of users whose memberships are cached.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live for cached memberships in seconds.
    #[serde(default = "default_ttl")]
    pub time_to_live_seconds: u64,
}

impl Default for GroupCacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_capacity: default_max_capacity(),
            time_to_live_seconds: default_ttl(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_capacity() -> u64 {
    10_000
}

fn default_ttl() -> u64 {
    60
}
