//! External storage configuration repository.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use mountview_core::result::AppResult;
use mountview_core::types::StorageId;
use mountview_entity::storage::{StorageConfig, normalize_mount_point};
use mountview_service::ports::StorageConfigSource;

/// Repository for configured external storages, in configuration order.
#[derive(Debug)]
pub struct StorageConfigRepository {
    storages: RwLock<Vec<StorageConfig>>,
    next_id: AtomicI64,
}

impl Default for StorageConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageConfigRepository {
    /// Create an empty storage repository. Ids are assigned from 1.
    pub fn new() -> Self {
        Self {
            storages: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Store a storage under a freshly assigned id and return the stored copy.
    ///
    /// The incoming id is ignored and the mount point is normalized.
    pub async fn add(&self, mut storage: StorageConfig) -> StorageConfig {
        storage.id = StorageId(self.next_id.fetch_add(1, Ordering::SeqCst));
        storage.mount_point = normalize_mount_point(&storage.mount_point);

        info!(
            storage_id = %storage.id,
            backend = %storage.backend,
            mount_point = %storage.mount_point,
            "Added storage"
        );
        self.storages.write().await.push(storage.clone());
        storage
    }

    /// Find a storage by ID, regardless of who it applies to.
    pub async fn find_by_id(&self, id: StorageId) -> Option<StorageConfig> {
        self.storages
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Remove a storage. Returns `true` if it existed.
    pub async fn remove(&self, id: StorageId) -> bool {
        let mut storages = self.storages.write().await;
        let before = storages.len();
        storages.retain(|s| s.id != id);
        storages.len() != before
    }
}

#[async_trait]
impl StorageConfigSource for StorageConfigRepository {
    async fn list_configured_storages(&self) -> AppResult<Vec<StorageConfig>> {
        Ok(self.storages.read().await.clone())
    }
}
