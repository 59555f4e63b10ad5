//! Result type aliases for Inkpress.

use crate::InkpressError;

/// A specialized `Result` type for Inkpress operations.
pub type InkpressResult<T> = Result<T, InkpressError>;
