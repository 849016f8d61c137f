//! External storage configuration model.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use mountview_core::error::AppError;
use mountview_core::result::AppResult;
use mountview_core::types::{GroupId, StorageId, UserId};

use super::applicability::Applicability;
use super::mount_point::normalize_mount_point;

/// Priority assigned to storages that do not configure one.
pub const DEFAULT_PRIORITY: i32 = 100;

/// A configured external storage mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Unique storage identifier.
    pub id: StorageId,
    /// Path at which the storage is mounted in each user's tree.
    pub mount_point: String,
    /// Identifier of the storage backend (e.g. `smb`, `webdav`).
    pub backend: String,
    /// Identifier of the authentication mechanism.
    pub auth_mechanism: String,
    /// Backend-specific options, passed through untouched.
    #[serde(default)]
    pub backend_options: BTreeMap<String, serde_json::Value>,
    /// Users the storage applies to.
    #[serde(default)]
    pub applicable_users: BTreeSet<UserId>,
    /// Groups the storage applies to.
    #[serde(default)]
    pub applicable_groups: BTreeSet<GroupId>,
    /// Precedence among storages with the same backend and mount point.
    #[serde(default = "default_priority")]
    pub priority: i32,
}

impl StorageConfig {
    /// Create an unrestricted storage with the default priority.
    pub fn new(
        id: StorageId,
        mount_point: &str,
        backend: impl Into<String>,
        auth_mechanism: impl Into<String>,
    ) -> Self {
        Self {
            id,
            mount_point: normalize_mount_point(mount_point),
            backend: backend.into(),
            auth_mechanism: auth_mechanism.into(),
            backend_options: BTreeMap::new(),
            applicable_users: BTreeSet::new(),
            applicable_groups: BTreeSet::new(),
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Set the precedence.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Restrict the storage to the given users.
    pub fn with_applicable_users<I, U>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<UserId>,
    {
        self.applicable_users = users.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the storage to the given groups.
    pub fn with_applicable_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupId>,
    {
        self.applicable_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Add a backend option.
    pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.backend_options.insert(key.into(), value);
        self
    }

    /// Whether neither users nor groups restrict this storage.
    pub fn is_unrestricted(&self) -> bool {
        self.applicable_users.is_empty() && self.applicable_groups.is_empty()
    }

    /// The most specific way this storage applies to `user`, or `None` if
    /// the storage is not visible to them.
    pub fn applicability_for(
        &self,
        user: &UserId,
        groups: &HashSet<GroupId>,
    ) -> Option<Applicability> {
        if self.applicable_users.contains(user) {
            Some(Applicability::User)
        } else if self.applicable_groups.iter().any(|g| groups.contains(g)) {
            Some(Applicability::Group)
        } else if self.is_unrestricted() {
            Some(Applicability::All)
        } else {
            None
        }
    }

    /// Whether `user`, a member of `groups`, can see this storage.
    pub fn is_visible_to(&self, user: &UserId, groups: &HashSet<GroupId>) -> bool {
        self.applicability_for(user, groups).is_some()
    }

    /// Key identifying storages that collide for one user.
    pub fn dedup_key(&self) -> (String, String) {
        (self.backend.clone(), normalize_mount_point(&self.mount_point))
    }

    /// Check the invariants a storage must satisfy to be mounted.
    pub fn validate(&self) -> AppResult<()> {
        if self.backend.trim().is_empty() {
            return Err(AppError::invalid_configuration(format!(
                "Storage {} has no backend",
                self.id
            )));
        }
        if self.auth_mechanism.trim().is_empty() {
            return Err(AppError::invalid_configuration(format!(
                "Storage {} has no authentication mechanism",
                self.id
            )));
        }
        if normalize_mount_point(&self.mount_point) == "/" {
            return Err(AppError::invalid_configuration(format!(
                "Storage {} has an empty mount point",
                self.id
            )));
        }
        Ok(())
    }
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}
