//! External storage domain entities.

pub mod applicability;
pub mod model;
pub mod mount_point;

pub use applicability::Applicability;
pub use model::{DEFAULT_PRIORITY, StorageConfig};
pub use mount_point::normalize_mount_point;
