//! # mountview-cache
//!
//! In-process caches using [moka](https://crates.io/crates/moka), placed in
//! front of the collaborator ports whose answers change rarely compared to
//! how often mounts are resolved.

pub mod memory;

pub use memory::CachedGroupLookup;
