//! Received shares: merging and mounting.

pub mod merge;
pub mod mount;

pub use merge::{MergeOutcome, ShareGroup, ShareMergeResolver, merge_shares};
pub use mount::{MountSet, ShareMountProvider};
