//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use mountview::{AppConfig, MountView, Ports};
use mountview_core::types::{GroupId, ResourceId, ShareId, UserId};
use mountview_database::{GroupRepository, ShareRepository, StorageConfigRepository};
use mountview_entity::share::{Share, SharePermissions, ShareRecord};

/// Test application context backed by the in-memory repositories.
pub struct TestApp {
    /// The wired resolvers.
    pub view: MountView,
    /// Share repository, for direct inspection.
    pub shares: Arc<ShareRepository>,
    /// Group membership repository.
    pub groups: Arc<GroupRepository>,
    /// Storage configuration repository.
    pub storages: Arc<StorageConfigRepository>,
}

impl TestApp {
    /// Create a test application with the default configuration and the
    /// group cache disabled.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.group_cache.enabled = false;
        Self::with_config(config)
    }

    /// Create a test application from `config`.
    pub fn with_config(config: AppConfig) -> Self {
        let groups = Arc::new(GroupRepository::new());
        let shares = Arc::new(ShareRepository::new(groups.clone()));
        let storages = Arc::new(StorageConfigRepository::new());

        let view = MountView::new(
            &config,
            Ports {
                shares: shares.clone(),
                share_mutation: shares.clone(),
                groups: groups.clone(),
                storages: storages.clone(),
            },
        );

        Self {
            view,
            shares,
            groups,
            storages,
        }
    }

    /// Put `user` in every one of `groups`.
    pub async fn add_user(&self, user: &str, groups: &[&str]) {
        for group in groups {
            self.groups
                .add_member(UserId::from(user), GroupId::from(*group))
                .await;
        }
    }

    /// Store a direct share to `recipient`.
    pub async fn share_with_user(
        &self,
        id: i64,
        resource: i64,
        owner: &str,
        recipient: &str,
        target: &str,
        permissions: SharePermissions,
    ) {
        self.shares
            .create(Share::user(
                record(id, resource, owner, target, permissions),
                UserId::from(recipient),
            ))
            .await
            .expect("Failed to create user share");
    }

    /// Store a share to `group`.
    pub async fn share_with_group(
        &self,
        id: i64,
        resource: i64,
        owner: &str,
        group: &str,
        target: &str,
        permissions: SharePermissions,
    ) {
        self.shares
            .create(Share::group(
                record(id, resource, owner, target, permissions),
                GroupId::from(group),
            ))
            .await
            .expect("Failed to create group share");
    }
}

/// Creation time derived from the id, so ids follow creation order.
pub fn created_at(id: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_469_193_980 + 1000 * id, 0).unwrap()
}

/// A share record created at [`created_at`]`(id)`.
pub fn record(
    id: i64,
    resource: i64,
    owner: &str,
    target: &str,
    permissions: SharePermissions,
) -> ShareRecord {
    ShareRecord::new(
        ShareId(id),
        ResourceId(resource),
        UserId::from(owner),
        target,
        permissions,
        created_at(id),
    )
}
