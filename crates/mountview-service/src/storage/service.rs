//! External storages as seen by one user.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use mountview_core::error::AppError;
use mountview_core::result::AppResult;
use mountview_core::types::{GroupId, StorageId, UserId};
use mountview_entity::storage::StorageConfig;

use super::applicability::{select_applicable, select_unique};
use crate::ports::{GroupLookup, StorageConfigSource};

/// Read-only view of the configured storages for a given user.
#[derive(Clone)]
pub struct UserStorageService {
    /// Storage configuration source.
    source: Arc<dyn StorageConfigSource>,
    /// Group membership lookup.
    groups: Arc<dyn GroupLookup>,
}

impl std::fmt::Debug for UserStorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStorageService").finish()
    }
}

impl UserStorageService {
    /// Creates a new user storage service.
    pub fn new(source: Arc<dyn StorageConfigSource>, groups: Arc<dyn GroupLookup>) -> Self {
        Self { source, groups }
    }

    /// Lists every storage visible to `user`, in configuration order.
    pub async fn list_applicable(&self, user: &UserId) -> AppResult<Vec<StorageConfig>> {
        let (storages, groups) = self.snapshot(user).await?;
        let applicable = select_applicable(storages, user, &groups);

        debug!(user = %user, count = applicable.len(), "Listed applicable storages");
        Ok(applicable)
    }

    /// Lists the storages visible to `user`, keeping one storage per backend
    /// and mount point.
    pub async fn list_unique(
        &self,
        user: &UserId,
    ) -> AppResult<BTreeMap<StorageId, StorageConfig>> {
        let (storages, groups) = self.snapshot(user).await?;
        let unique = select_unique(storages, user, &groups);

        debug!(user = %user, count = unique.len(), "Listed unique storages");
        Ok(unique)
    }

    /// Gets one storage visible to `user`.
    ///
    /// A storage that exists but does not apply to the user yields the same
    /// not-found error as an unknown id.
    pub async fn get_storage(&self, user: &UserId, id: StorageId) -> AppResult<StorageConfig> {
        self.list_applicable(user)
            .await?
            .into_iter()
            .find(|storage| storage.id == id)
            .ok_or_else(|| AppError::not_found(format!("Storage with id \"{id}\" not found")))
    }

    /// Fetches the configuration and the user's groups, once each.
    async fn snapshot(&self, user: &UserId) -> AppResult<(Vec<StorageConfig>, HashSet<GroupId>)> {
        let storages = self.source.list_configured_storages().await?;
        let groups = self.groups.groups_of(user).await?;
        Ok((storages, groups))
    }
}
