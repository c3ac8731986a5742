//! Convenience result type alias for the Study Library.

use crate::error::AppError;

/// A specialized `Result` type for Study Library operations.
pub type AppResult<T> = Result<T, AppError>;
