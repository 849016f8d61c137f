//! Share merge resolver configuration.

use serde::{Deserialize, Serialize};

/// Behaviour switches for the share merge resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Persist the winning target onto every merged share whose stored
    /// target differs from it.
    #[serde(default = "default_true")]
    pub reconcile_targets: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            reconcile_targets: true,
        }
    }
}

fn default_true() -> bool {
    true
}
