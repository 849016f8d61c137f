//! MountView: resolves the mounts a user sees.
//!
//! Wires the MountView crates together: configuration, logging, the share
//! merge resolver and the external storage service. Collaborators are
//! supplied by the embedding application through the ports re-exported
//! here; in-memory implementations live in `mountview-database`.

pub mod app;
pub mod telemetry;

pub use app::{MountView, Ports};
pub use mountview_core::config::AppConfig;
pub use mountview_core::{AppError, AppResult};
pub use mountview_entity::share::{Share, SharePermissions, SharedMount, SuperShare};
pub use mountview_entity::storage::{Applicability, StorageConfig};
pub use mountview_service::{
    GroupLookup, MountSet, ResolveWarning, ShareLookup, ShareMutation, StorageConfigSource,
};
