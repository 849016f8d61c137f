//! Share merging.
//!
//! A user may receive the same node several times: directly and through
//! any number of groups. Every accepted grant of one node collapses into a
//! single [`SuperShare`]:
//!
//! 1. Shares that are opted out of (no permission), pending, rejected or
//!    owned by the recipient are dropped silently.
//! 2. The remaining shares are grouped by resource, in first-encounter
//!    order.
//! 3. The earliest-created share of a group (ties: lower id, then direct
//!    before group) is the representative and provides id, owner and
//!    target. Permissions are the union of the whole group.
//! 4. Members whose stored target differs from the representative's are
//!    moved to the winning target through the [`ShareMutation`] port.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use mountview_core::config::resolver::ResolverConfig;
use mountview_core::result::AppResult;
use mountview_core::types::{ResourceId, UserId};
use mountview_entity::share::{Share, SharePermissions, ShareType, SuperShare};

use crate::ports::{ShareLookup, ShareMutation};
use crate::warning::ResolveWarning;

/// Share types that can be mounted for a recipient; fetched in one call.
pub const RECEIVED_SHARE_TYPES: [ShareType; 2] = [ShareType::User, ShareType::Group];

/// The shares of one resource together with their merged result.
#[derive(Debug, Clone, Serialize)]
pub struct ShareGroup {
    /// The merged share.
    pub super_share: SuperShare,
    /// Contributing shares, representative first.
    pub members: Vec<Share>,
}

/// Result of merging the shares received by one user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeOutcome {
    /// One group per visible resource, in first-encounter order.
    pub groups: Vec<ShareGroup>,
    /// Non-fatal problems met while merging.
    pub warnings: Vec<ResolveWarning>,
}

impl MergeOutcome {
    /// The merged shares, in output order.
    pub fn super_shares(&self) -> impl Iterator<Item = &SuperShare> {
        self.groups.iter().map(|g| &g.super_share)
    }

    /// Consume the outcome, keeping only the merged shares.
    pub fn into_super_shares(self) -> Vec<SuperShare> {
        self.groups.into_iter().map(|g| g.super_share).collect()
    }
}

/// Merge the shares received by `recipient` without touching any
/// collaborator.
///
/// The returned groups carry each member's stored target unchanged; target
/// reconciliation is left to [`ShareMergeResolver`].
pub fn merge_shares(recipient: &UserId, shares: Vec<Share>) -> MergeOutcome {
    let mut warnings = Vec::new();
    let mut order: Vec<ResourceId> = Vec::new();
    let mut buckets: HashMap<ResourceId, Vec<Share>> = HashMap::new();

    for share in shares {
        if !share.is_live_for(recipient) {
            continue;
        }

        if let Err(e) = share.validate() {
            warn!(
                user = %recipient,
                share_id = %share.id(),
                error = %e,
                "Skipping invalid share"
            );
            warnings.push(ResolveWarning::InvalidShare {
                share_id: share.id(),
                message: e.message,
            });
            continue;
        }

        let resource_id = share.resource_id();
        buckets
            .entry(resource_id)
            .or_insert_with(|| {
                order.push(resource_id);
                Vec::new()
            })
            .push(share);
    }

    let groups = order
        .into_iter()
        .filter_map(|resource_id| buckets.remove(&resource_id))
        .filter_map(reduce_group)
        .collect();

    MergeOutcome { groups, warnings }
}

/// Build the super-share of one non-empty group of shares.
fn reduce_group(mut members: Vec<Share>) -> Option<ShareGroup> {
    members.sort_by(representative_order);

    let representative = members.first()?;
    let permissions: SharePermissions = members.iter().map(Share::permissions).collect();

    let super_share = SuperShare {
        id: representative.id(),
        resource_id: representative.resource_id(),
        owner_id: representative.owner_id().clone(),
        target: representative.target().to_string(),
        permissions,
        contributing: members.iter().map(Share::id).collect(),
    };

    Some(ShareGroup {
        super_share,
        members,
    })
}

/// Earliest creation first, then ascending id, then direct shares first.
fn representative_order(a: &Share, b: &Share) -> Ordering {
    a.created_at()
        .cmp(&b.created_at())
        .then_with(|| a.id().cmp(&b.id()))
        .then_with(|| type_rank(a).cmp(&type_rank(b)))
}

fn type_rank(share: &Share) -> u8 {
    match share {
        Share::User { .. } => 0,
        Share::Group { .. } => 1,
    }
}

/// Resolves the super-shares a user receives.
#[derive(Clone)]
pub struct ShareMergeResolver {
    /// Share lookup collaborator.
    lookup: Arc<dyn ShareLookup>,
    /// Mutation collaborator used for target reconciliation.
    mutation: Option<Arc<dyn ShareMutation>>,
    /// Whether diverging targets are persisted.
    reconcile_targets: bool,
}

impl std::fmt::Debug for ShareMergeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareMergeResolver")
            .field("has_mutation", &self.mutation.is_some())
            .field("reconcile_targets", &self.reconcile_targets)
            .finish()
    }
}

impl ShareMergeResolver {
    /// Creates a resolver that never writes back.
    pub fn new(lookup: Arc<dyn ShareLookup>) -> Self {
        Self {
            lookup,
            mutation: None,
            reconcile_targets: false,
        }
    }

    /// Creates a resolver configured from `config`.
    pub fn from_config(
        config: &ResolverConfig,
        lookup: Arc<dyn ShareLookup>,
        mutation: Arc<dyn ShareMutation>,
    ) -> Self {
        Self::new(lookup)
            .with_mutation(mutation)
            .with_reconciliation(config.reconcile_targets)
    }

    /// Injects the mutation collaborator and enables reconciliation.
    pub fn with_mutation(mut self, mutation: Arc<dyn ShareMutation>) -> Self {
        self.mutation = Some(mutation);
        self.reconcile_targets = true;
        self
    }

    /// Enables or disables target reconciliation.
    pub fn with_reconciliation(mut self, enabled: bool) -> Self {
        self.reconcile_targets = enabled;
        self
    }

    /// Resolves the merged shares received by `recipient`.
    ///
    /// Performs exactly one share lookup. Lookup failures are returned as
    /// errors; rename rejections and invalid records become warnings.
    pub async fn resolve(&self, recipient: &UserId) -> AppResult<MergeOutcome> {
        let shares = self
            .lookup
            .fetch_shares_for_recipient(recipient, &RECEIVED_SHARE_TYPES, None)
            .await?;
        let fetched = shares.len();

        let mut outcome = merge_shares(recipient, shares);

        if self.reconcile_targets {
            if let Some(mutation) = &self.mutation {
                for group in &mut outcome.groups {
                    reconcile_group(mutation.as_ref(), recipient, group, &mut outcome.warnings)
                        .await;
                }
            }
        }

        debug!(
            user = %recipient,
            fetched,
            merged = outcome.groups.len(),
            warnings = outcome.warnings.len(),
            "Resolved received shares"
        );

        Ok(outcome)
    }
}

/// Moves every member of `group` onto the winning target.
async fn reconcile_group(
    mutation: &dyn ShareMutation,
    recipient: &UserId,
    group: &mut ShareGroup,
    warnings: &mut Vec<ResolveWarning>,
) {
    let target = group.super_share.target.clone();

    for member in &mut group.members {
        if member.target() == target {
            continue;
        }

        match mutation
            .rename_share_target(member.id(), recipient, &target)
            .await
        {
            Ok(()) => {
                debug!(
                    user = %recipient,
                    share_id = %member.id(),
                    from = member.target(),
                    to = %target,
                    "Moved merged share to winning target"
                );
                member.record_mut().target = target.clone();
            }
            Err(e) => {
                warn!(
                    user = %recipient,
                    share_id = %member.id(),
                    target = %target,
                    error = %e,
                    "Could not move merged share"
                );
                warnings.push(ResolveWarning::TargetRenameFailed {
                    share_id: member.id(),
                    target: target.clone(),
                    message: e.message,
                });
            }
        }
    }
}
