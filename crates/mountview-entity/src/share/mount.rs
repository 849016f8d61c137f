//! Shared mount value object.

use serde::{Deserialize, Serialize};

use mountview_core::types::UserId;

use super::merged::SuperShare;
use super::model::Share;

/// A super-share placed in a user's file tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedMount {
    /// Absolute mount point, `/{user}/files{target}`.
    pub mount_point: String,
    /// The merged share backing this mount.
    pub share: SuperShare,
    /// The raw shares merged into `share`.
    pub grouped_shares: Vec<Share>,
}

impl SharedMount {
    /// Build the mount for `user` from a merged share.
    pub fn new(user: &UserId, share: SuperShare, grouped_shares: Vec<Share>) -> Self {
        let mount_point = mount_point_for(user, &share.target);
        Self {
            mount_point,
            share,
            grouped_shares,
        }
    }
}

/// Compute `/{user}/files{target}` with exactly one slash before the target.
pub fn mount_point_for(user: &UserId, target: &str) -> String {
    let target = target.trim_start_matches('/');
    format!("/{user}/files/{target}")
}
