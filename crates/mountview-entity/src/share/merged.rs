//! Merged ("super") share produced by the share merge resolver.

use serde::{Deserialize, Serialize};

use mountview_core::types::{ResourceId, ShareId, UserId};

use super::permission::SharePermissions;

/// The single effective share a recipient holds on one resource.
///
/// `id`, `owner_id` and `target` come from the representative share, the
/// earliest-created contributing share. `permissions` is the union of every
/// contributing share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperShare {
    /// Id of the representative share.
    pub id: ShareId,
    /// The shared node.
    pub resource_id: ResourceId,
    /// Owner taken from the representative share.
    pub owner_id: UserId,
    /// Winning target path.
    pub target: String,
    /// Union of all contributing permission masks.
    pub permissions: SharePermissions,
    /// Every contributing share, representative first.
    pub contributing: Vec<ShareId>,
}

