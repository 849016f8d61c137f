//! Repository implementations for all MountView records.

pub mod group;
pub mod share;
pub mod storage;

pub use group::GroupRepository;
pub use share::ShareRepository;
pub use storage::StorageConfigRepository;
