//! # mountview-core
//!
//! Core crate for MountView. Contains the unified error system, configuration
//! schemas, and typed identifiers.
//!
//! This crate has **no** internal dependencies on other MountView crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
