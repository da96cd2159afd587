//! Convenience result type alias for Folderkit.

use crate::error::AppError;

/// A specialized `Result` type for Folderkit operations.
pub type AppResult<T> = Result<T, AppError>;
