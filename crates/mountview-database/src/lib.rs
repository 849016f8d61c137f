//! # mountview-database
//!
//! In-memory repositories implementing the collaborator ports of
//! `mountview-service`: received shares (with per-recipient targets for
//! group shares), configured external storages and group memberships.
//!
//! Records are kept in insertion order behind `tokio::sync::RwLock`, so the
//! repositories can be shared between tasks through `Arc`.

pub mod repositories;

pub use repositories::{GroupRepository, ShareRepository, StorageConfigRepository};
