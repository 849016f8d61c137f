//! # mountview-service
//!
//! Resolvers deciding which mounts a user sees. Each resolver consumes its
//! collaborators through the ports in [`ports`], injected at construction
//! time as `Arc<dyn Port>`.
//!
//! - `share`: merges direct and group shares of one resource into a
//!   single super-share and turns super-shares into mounts.
//! - `storage`: filters configured external storages to those applicable
//!   to a user and keeps one storage per backend and mount point.

pub mod ports;
pub mod share;
pub mod storage;
pub mod warning;

#[cfg(test)]
mod testing;

pub use ports::{GroupLookup, ShareLookup, ShareMutation, StorageConfigSource};
pub use share::{MergeOutcome, MountSet, ShareGroup, ShareMergeResolver, ShareMountProvider};
pub use storage::UserStorageService;
pub use warning::ResolveWarning;
