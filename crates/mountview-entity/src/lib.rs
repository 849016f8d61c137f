//! # mountview-entity
//!
//! Domain entity models for MountView. Every struct in this crate is an
//! in-memory record supplied by a collaborator (shares, storage
//! configurations) or a value produced by the resolvers (super-shares,
//! shared mounts). All entities derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`.

pub mod share;
pub mod storage;
