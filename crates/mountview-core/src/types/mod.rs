//! Core type definitions used across the MountView workspace.

pub mod id;

pub use id::*;
