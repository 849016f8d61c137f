//! Storage applicability and precedence.
//!
//! A storage is visible to a user when it is unrestricted, lists the user,
//! or lists one of the user's groups. Among visible storages sharing a
//! backend and mount point only one survives:
//!
//! 1. Higher `priority` wins.
//! 2. On equal priority the more specific applicability wins
//!    (user > group > all).
//! 3. On a full tie the storage configured first wins.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use mountview_core::types::{GroupId, StorageId, UserId};
use mountview_entity::storage::{Applicability, StorageConfig};

/// Keep the valid storages visible to `user`, in configuration order.
///
/// Invalid records are logged and skipped.
pub fn select_applicable(
    storages: Vec<StorageConfig>,
    user: &UserId,
    groups: &HashSet<GroupId>,
) -> Vec<StorageConfig> {
    storages
        .into_iter()
        .filter(|storage| match storage.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(storage_id = %storage.id, error = %e, "Skipping invalid storage");
                false
            }
        })
        .filter(|storage| storage.is_visible_to(user, groups))
        .collect()
}

/// Whether `candidate` takes precedence over `current`.
///
/// Ties keep `current`, so the first configured storage wins.
pub fn outranks(
    candidate: (&StorageConfig, Applicability),
    current: (&StorageConfig, Applicability),
) -> bool {
    (candidate.0.priority, candidate.1) > (current.0.priority, current.1)
}

/// Reduce the storages visible to `user` to one per backend and mount
/// point.
///
/// A record reusing the id of an earlier record is skipped.
pub fn select_unique(
    storages: Vec<StorageConfig>,
    user: &UserId,
    groups: &HashSet<GroupId>,
) -> BTreeMap<StorageId, StorageConfig> {
    let mut winners: HashMap<(String, String), (StorageConfig, Applicability)> = HashMap::new();
    let mut seen_ids: HashSet<StorageId> = HashSet::new();

    for storage in select_applicable(storages, user, groups) {
        if !seen_ids.insert(storage.id) {
            warn!(
                user = %user,
                storage_id = %storage.id,
                "Skipping storage with duplicate id"
            );
            continue;
        }
        let Some(applicability) = storage.applicability_for(user, groups) else {
            continue;
        };

        match winners.entry(storage.dedup_key()) {
            Entry::Vacant(slot) => {
                slot.insert((storage, applicability));
            }
            Entry::Occupied(mut slot) => {
                let (current, current_applicability) = slot.get();
                if outranks((&storage, applicability), (current, *current_applicability)) {
                    debug!(
                        user = %user,
                        winner = %storage.id,
                        shadowed = %current.id,
                        "Storage overrides earlier storage"
                    );
                    slot.insert((storage, applicability));
                } else {
                    debug!(
                        user = %user,
                        winner = %current.id,
                        shadowed = %storage.id,
                        "Storage shadowed by earlier storage"
                    );
                }
            }
        }
    }

    winners
        .into_values()
        .map(|(storage, _)| (storage.id, storage))
        .collect()
}
