//! moka-backed caches.

pub mod groups;

pub use groups::CachedGroupLookup;
