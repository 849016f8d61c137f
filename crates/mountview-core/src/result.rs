//! Convenience result type alias for MountView.

use crate::error::AppError;

/// A specialized `Result` type for MountView operations.
pub type AppResult<T> = Result<T, AppError>;
