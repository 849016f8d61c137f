//! Collaborator ports consumed by the resolvers.
//!
//! Persistence and group resolution live outside this crate; the resolvers
//! only see these traits.

use std::collections::HashSet;

use async_trait::async_trait;

use mountview_core::result::AppResult;
use mountview_core::types::{GroupId, ShareId, UserId};
use mountview_entity::share::{Share, ShareType};
use mountview_entity::storage::StorageConfig;

/// Source of the shares a user has received.
#[async_trait]
pub trait ShareLookup: Send + Sync + 'static {
    /// Return every share of the given `types` received by `user`, directly
    /// or through one of `groups`, in creation order.
    ///
    /// All requested types are answered by this one call. When `groups` is
    /// `None` the implementation resolves the user's groups itself.
    async fn fetch_shares_for_recipient(
        &self,
        user: &UserId,
        types: &[ShareType],
        groups: Option<&[GroupId]>,
    ) -> AppResult<Vec<Share>>;
}

/// Persists changes the share merge resolver makes to received shares.
#[async_trait]
pub trait ShareMutation: Send + Sync + 'static {
    /// Store `target` as the path under which `recipient` sees `share_id`.
    ///
    /// Best effort: a rejection is reported back to the caller as a
    /// warning and never aborts a merge.
    async fn rename_share_target(
        &self,
        share_id: ShareId,
        recipient: &UserId,
        target: &str,
    ) -> AppResult<()>;
}

/// Group membership lookup.
#[async_trait]
pub trait GroupLookup: Send + Sync + 'static {
    /// Return the ids of all groups `user` belongs to.
    async fn groups_of(&self, user: &UserId) -> AppResult<HashSet<GroupId>>;
}

/// Source of the configured external storages.
#[async_trait]
pub trait StorageConfigSource: Send + Sync + 'static {
    /// Return every configured storage in configuration order.
    async fn list_configured_storages(&self) -> AppResult<Vec<StorageConfig>>;
}
