//! Group membership repository.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use mountview_core::result::AppResult;
use mountview_core::types::{GroupId, UserId};
use mountview_service::ports::GroupLookup;

/// Repository of user → group memberships.
#[derive(Debug, Default)]
pub struct GroupRepository {
    memberships: RwLock<HashMap<UserId, HashSet<GroupId>>>,
}

impl GroupRepository {
    /// Create an empty group repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `user` to `group`. Returns `false` if already a member.
    pub async fn add_member(&self, user: UserId, group: GroupId) -> bool {
        debug!(user = %user, group = %group, "Adding group member");
        self.memberships
            .write()
            .await
            .entry(user)
            .or_default()
            .insert(group)
    }

    /// Remove `user` from `group`. Returns `true` if a membership was removed.
    pub async fn remove_member(&self, user: &UserId, group: &GroupId) -> bool {
        let mut memberships = self.memberships.write().await;
        let removed = memberships
            .get_mut(user)
            .map(|groups| groups.remove(group))
            .unwrap_or(false);
        if removed {
            debug!(user = %user, group = %group, "Removed group member");
        }
        removed
    }

    /// Whether `user` belongs to `group`.
    pub async fn is_member(&self, user: &UserId, group: &GroupId) -> bool {
        self.memberships
            .read()
            .await
            .get(user)
            .is_some_and(|groups| groups.contains(group))
    }
}

#[async_trait]
impl GroupLookup for GroupRepository {
    async fn groups_of(&self, user: &UserId) -> AppResult<HashSet<GroupId>> {
        Ok(self
            .memberships
            .read()
            .await
            .get(user)
            .cloned()
            .unwrap_or_default())
    }
}
