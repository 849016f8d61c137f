//! Non-fatal problems reported alongside a resolve result.

use std::fmt;

use serde::{Deserialize, Serialize};

use mountview_core::types::ShareId;

/// A problem that did not stop the resolver from producing a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveWarning {
    /// Persisting the winning target onto a merged share was rejected. The
    /// merged result still uses `target`.
    TargetRenameFailed {
        share_id: ShareId,
        target: String,
        message: String,
    },
    /// A received share violated a record invariant and was skipped.
    InvalidShare { share_id: ShareId, message: String },
}

impl ResolveWarning {
    /// The share the warning is about.
    pub fn share_id(&self) -> ShareId {
        match self {
            Self::TargetRenameFailed { share_id, .. } | Self::InvalidShare { share_id, .. } => {
                *share_id
            }
        }
    }
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetRenameFailed {
                share_id,
                target,
                message,
            } => write!(
                f,
                "could not move share {share_id} to '{target}': {message}"
            ),
            Self::InvalidShare { share_id, message } => {
                write!(f, "skipped share {share_id}: {message}")
            }
        }
    }
}
