//! Turns merged shares into mounts in the recipient's file tree.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use mountview_core::result::AppResult;
use mountview_core::types::UserId;
use mountview_entity::share::SharedMount;

use super::merge::ShareMergeResolver;
use crate::warning::ResolveWarning;

/// Mounts produced for one user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MountSet {
    /// One mount per merged share, in resolver order.
    pub mounts: Vec<SharedMount>,
    /// Non-fatal problems met while resolving.
    pub warnings: Vec<ResolveWarning>,
}

impl MountSet {
    /// Finds the mount at an exact mount point.
    pub fn find(&self, mount_point: &str) -> Option<&SharedMount> {
        self.mounts.iter().find(|m| m.mount_point == mount_point)
    }
}

/// Provides the shared mounts of a user.
#[derive(Debug, Clone)]
pub struct ShareMountProvider {
    /// Share merge resolver.
    resolver: Arc<ShareMergeResolver>,
}

impl ShareMountProvider {
    /// Creates a new mount provider.
    pub fn new(resolver: Arc<ShareMergeResolver>) -> Self {
        Self { resolver }
    }

    /// Returns one mount per resource shared with `user`.
    pub async fn mounts_for_user(&self, user: &UserId) -> AppResult<MountSet> {
        let outcome = self.resolver.resolve(user).await?;

        let mounts: Vec<SharedMount> = outcome
            .groups
            .into_iter()
            .map(|group| SharedMount::new(user, group.super_share, group.members))
            .collect();

        info!(
            user = %user,
            mounts = mounts.len(),
            warnings = outcome.warnings.len(),
            "Built shared mounts"
        );

        Ok(MountSet {
            mounts,
            warnings: outcome.warnings,
        })
    }
}
