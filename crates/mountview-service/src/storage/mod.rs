//! External storages: applicability filtering and uniqueness reduction.

pub mod applicability;
pub mod service;

pub use applicability::{outranks, select_applicable, select_unique};
pub use service::UserStorageService;
