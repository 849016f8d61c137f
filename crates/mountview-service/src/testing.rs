//! In-crate fakes for the collaborator ports.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use mountview_core::error::AppError;
use mountview_core::result::AppResult;
use mountview_core::types::{GroupId, ResourceId, ShareId, UserId};
use mountview_entity::share::{Share, SharePermissions, ShareRecord, ShareType};
use mountview_entity::storage::StorageConfig;

use crate::ports::{GroupLookup, ShareLookup, ShareMutation, StorageConfigSource};

/// Creation time derived from the id, so ids follow creation order.
pub fn share_time(id: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_469_193_980 + 1000 * id, 0).unwrap()
}

pub fn share_record(id: i64, resource: i64, owner: &str, target: &str, perms: u32) -> ShareRecord {
    ShareRecord::new(
        ShareId(id),
        ResourceId(resource),
        UserId::from(owner),
        target,
        SharePermissions(perms),
        share_time(id),
    )
}

/// A direct share to `user1`.
pub fn user_share(id: i64, resource: i64, owner: &str, target: &str, perms: u32) -> Share {
    Share::user(
        share_record(id, resource, owner, target, perms),
        UserId::from("user1"),
    )
}

/// A share to `group1`.
pub fn group_share(id: i64, resource: i64, owner: &str, target: &str, perms: u32) -> Share {
    Share::group(
        share_record(id, resource, owner, target, perms),
        GroupId::from("group1"),
    )
}

type FetchRequest = (UserId, Vec<ShareType>, bool);
type RenameRequest = (ShareId, UserId, String);

/// Returns a fixed list of shares and records every call.
pub struct FakeShareStore {
    shares: Vec<Share>,
    requests: Mutex<Vec<FetchRequest>>,
    renames: Mutex<Vec<RenameRequest>>,
    reject_renames: AtomicBool,
    fail_lookup: AtomicBool,
}

impl FakeShareStore {
    pub fn new(shares: Vec<Share>) -> Arc<Self> {
        Arc::new(Self {
            shares,
            requests: Mutex::new(Vec::new()),
            renames: Mutex::new(Vec::new()),
            reject_renames: AtomicBool::new(false),
            fail_lookup: AtomicBool::new(false),
        })
    }

    pub fn rejecting_renames(self: Arc<Self>) -> Arc<Self> {
        self.reject_renames.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_lookup(self: Arc<Self>) -> Arc<Self> {
        self.fail_lookup.store(true, Ordering::SeqCst);
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// (user, types, groups supplied)
    pub fn fetch_requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn renames(&self) -> Vec<RenameRequest> {
        self.renames.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShareLookup for FakeShareStore {
    async fn fetch_shares_for_recipient(
        &self,
        user: &UserId,
        types: &[ShareType],
        groups: Option<&[GroupId]>,
    ) -> AppResult<Vec<Share>> {
        self.requests
            .lock()
            .unwrap()
            .push((user.clone(), types.to_vec(), groups.is_some()));

        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(AppError::lookup("share backend unavailable"));
        }
        Ok(self.shares.clone())
    }
}

#[async_trait]
impl ShareMutation for FakeShareStore {
    async fn rename_share_target(
        &self,
        share_id: ShareId,
        recipient: &UserId,
        target: &str,
    ) -> AppResult<()> {
        if self.reject_renames.load(Ordering::SeqCst) {
            return Err(AppError::mutation("group no longer exists"));
        }
        self.renames
            .lock()
            .unwrap()
            .push((share_id, recipient.clone(), target.to_string()));
        Ok(())
    }
}

/// Fixed group memberships with a call counter.
#[derive(Default)]
pub struct FakeDirectory {
    memberships: HashMap<UserId, HashSet<GroupId>>,
    calls: AtomicUsize,
}

impl FakeDirectory {
    pub fn with_member(mut self, user: &str, groups: &[&str]) -> Self {
        self.memberships.insert(
            UserId::from(user),
            groups.iter().map(|g| GroupId::from(*g)).collect(),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GroupLookup for FakeDirectory {
    async fn groups_of(&self, user: &UserId) -> AppResult<HashSet<GroupId>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.memberships.get(user).cloned().unwrap_or_default())
    }
}

/// Fixed storage configuration list.
pub struct FakeStorageSource(pub Vec<StorageConfig>);

#[async_trait]
impl StorageConfigSource for FakeStorageSource {
    async fn list_configured_storages(&self) -> AppResult<Vec<StorageConfig>> {
        Ok(self.0.clone())
    }
}
