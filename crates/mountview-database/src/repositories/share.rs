//! Received-share repository.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use mountview_core::error::AppError;
use mountview_core::result::AppResult;
use mountview_core::types::{GroupId, ShareId, UserId};
use mountview_entity::share::{Share, ShareType};
use mountview_service::ports::{GroupLookup, ShareLookup, ShareMutation};

/// Repository for user and group shares.
///
/// A group share has one stored target, but each member may move it to a
/// different path. Those per-recipient targets are kept as overrides and
/// applied when the share is fetched for that member.
pub struct ShareRepository {
    shares: RwLock<Vec<Share>>,
    target_overrides: RwLock<HashMap<(ShareId, UserId), String>>,
    groups: Arc<dyn GroupLookup>,
}

impl std::fmt::Debug for ShareRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareRepository").finish()
    }
}

impl ShareRepository {
    /// Create a new share repository resolving group membership through `groups`.
    pub fn new(groups: Arc<dyn GroupLookup>) -> Self {
        Self {
            shares: RwLock::new(Vec::new()),
            target_overrides: RwLock::new(HashMap::new()),
            groups,
        }
    }

    /// Insert a new share.
    pub async fn create(&self, share: Share) -> AppResult<()> {
        let mut shares = self.shares.write().await;
        if shares.iter().any(|s| s.id() == share.id()) {
            return Err(AppError::validation(format!(
                "Share {} already exists",
                share.id()
            )));
        }
        debug!(
            share_id = %share.id(),
            share_type = %share.share_type(),
            resource_id = %share.resource_id(),
            "Created share"
        );
        shares.push(share);
        Ok(())
    }

    /// Find a share by ID, with its stored target.
    pub async fn find_by_id(&self, id: ShareId) -> Option<Share> {
        self.shares
            .read()
            .await
            .iter()
            .find(|s| s.id() == id)
            .cloned()
    }

    /// Delete a share and any per-recipient targets it had.
    pub async fn delete(&self, id: ShareId) -> bool {
        let mut shares = self.shares.write().await;
        let before = shares.len();
        shares.retain(|s| s.id() != id);
        let removed = shares.len() != before;
        drop(shares);

        if removed {
            self.target_overrides
                .write()
                .await
                .retain(|(share_id, _), _| *share_id != id);
        }
        removed
    }

    /// The target `recipient` sees for a group share, if they moved it.
    pub async fn target_override(&self, id: ShareId, recipient: &UserId) -> Option<String> {
        self.target_overrides
            .read()
            .await
            .get(&(id, recipient.clone()))
            .cloned()
    }
}

#[async_trait]
impl ShareLookup for ShareRepository {
    async fn fetch_shares_for_recipient(
        &self,
        user: &UserId,
        types: &[ShareType],
        groups: Option<&[GroupId]>,
    ) -> AppResult<Vec<Share>> {
        let member_of: HashSet<GroupId> = match groups {
            Some(groups) => groups.iter().cloned().collect(),
            None if types.contains(&ShareType::Group) => self.groups.groups_of(user).await?,
            None => HashSet::new(),
        };

        let overrides = self.target_overrides.read().await;
        let shares = self.shares.read().await;

        let mut received: Vec<Share> = shares
            .iter()
            .filter(|share| types.contains(&share.share_type()))
            .filter(|share| match share {
                Share::User { recipient, .. } => recipient == user,
                Share::Group { group_id, .. } => member_of.contains(group_id),
            })
            .cloned()
            .map(|mut share| {
                if let Some(target) = overrides.get(&(share.id(), user.clone())) {
                    share.record_mut().target = target.clone();
                }
                share
            })
            .collect();
        received.sort_by_key(|share| (share.created_at(), share.id()));

        Ok(received)
    }
}

#[async_trait]
impl ShareMutation for ShareRepository {
    async fn rename_share_target(
        &self,
        share_id: ShareId,
        recipient: &UserId,
        target: &str,
    ) -> AppResult<()> {
        if target.trim().is_empty() {
            return Err(AppError::mutation(format!(
                "Cannot move share {share_id} to an empty target"
            )));
        }

        let share = self
            .find_by_id(share_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Share {share_id} not found")))?;

        match &share {
            Share::User { recipient: received_by, .. } => {
                if received_by != recipient {
                    return Err(AppError::mutation(format!(
                        "Share {share_id} was not received by {recipient}"
                    )));
                }
                let mut shares = self.shares.write().await;
                if let Some(stored) = shares.iter_mut().find(|s| s.id() == share_id) {
                    stored.record_mut().target = target.to_string();
                }
            }
            Share::Group { group_id, .. } => {
                let member_of = self.groups.groups_of(recipient).await?;
                if !member_of.contains(group_id) {
                    return Err(AppError::mutation(format!(
                        "{recipient} is not a member of group {group_id}"
                    )));
                }
                self.target_overrides
                    .write()
                    .await
                    .insert((share_id, recipient.clone()), target.to_string());
            }
        }

        info!(
            share_id = %share_id,
            recipient = %recipient,
            target = %target,
            "Moved share target"
        );
        Ok(())
    }
}
