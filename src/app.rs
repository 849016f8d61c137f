//! Application wiring.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use mountview_cache::CachedGroupLookup;
use mountview_core::config::AppConfig;
use mountview_core::result::AppResult;
use mountview_core::types::{StorageId, UserId};
use mountview_entity::storage::StorageConfig;
use mountview_service::{
    GroupLookup, MountSet, ShareLookup, ShareMergeResolver, ShareMountProvider, ShareMutation,
    StorageConfigSource, UserStorageService,
};

/// Collaborators supplied by the embedding application.
#[derive(Clone)]
pub struct Ports {
    /// Received-share lookup.
    pub shares: Arc<dyn ShareLookup>,
    /// Share target mutation.
    pub share_mutation: Arc<dyn ShareMutation>,
    /// Group membership lookup.
    pub groups: Arc<dyn GroupLookup>,
    /// External storage configuration.
    pub storages: Arc<dyn StorageConfigSource>,
}

/// Entry point for resolving a user's shared and external mounts.
#[derive(Debug, Clone)]
pub struct MountView {
    shares: ShareMountProvider,
    storages: UserStorageService,
    group_cache: Option<CachedGroupLookup>,
}

impl MountView {
    /// Build the resolvers from configuration and collaborators.
    ///
    /// When the group cache is enabled, every group lookup made through this
    /// instance goes through one shared moka cache, which
    /// [`MountView::invalidate_group_memberships`] flushes per user.
    pub fn new(config: &AppConfig, ports: Ports) -> Self {
        let group_cache = config
            .group_cache
            .enabled
            .then(|| CachedGroupLookup::new(ports.groups.clone(), &config.group_cache));
        let groups: Arc<dyn GroupLookup> = match &group_cache {
            Some(cache) => Arc::new(cache.clone()),
            None => ports.groups,
        };

        let resolver = Arc::new(ShareMergeResolver::from_config(
            &config.resolver,
            ports.shares,
            ports.share_mutation,
        ));
        let shares = ShareMountProvider::new(resolver);
        let storages = UserStorageService::new(ports.storages, groups);

        info!(
            reconcile_targets = config.resolver.reconcile_targets,
            group_cache = config.group_cache.enabled,
            "MountView initialized"
        );

        Self {
            shares,
            storages,
            group_cache,
        }
    }

    /// Drop the cached group memberships of `user`, so the next storage
    /// call sees membership changes made since. No-op without the cache.
    pub async fn invalidate_group_memberships(&self, user: &UserId) {
        if let Some(cache) = &self.group_cache {
            cache.invalidate(user).await;
        }
    }

    /// One mount per resource shared with `user`.
    pub async fn shared_mounts(&self, user: &UserId) -> AppResult<MountSet> {
        self.shares.mounts_for_user(user).await
    }

    /// External storages applicable to `user`, in configuration order.
    pub async fn applicable_storages(&self, user: &UserId) -> AppResult<Vec<StorageConfig>> {
        self.storages.list_applicable(user).await
    }

    /// External storages applicable to `user`, one per backend and mount point.
    pub async fn unique_storages(
        &self,
        user: &UserId,
    ) -> AppResult<BTreeMap<StorageId, StorageConfig>> {
        self.storages.list_unique(user).await
    }

    /// One external storage, if it applies to `user`.
    pub async fn storage(&self, user: &UserId, id: StorageId) -> AppResult<StorageConfig> {
        self.storages.get_storage(user, id).await
    }
}
