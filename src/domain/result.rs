//! Result type alias for ado-batch
//!
//! This module provides a convenient Result type alias that uses [`ImportError`]
//! as the error type.

use super::errors::ImportError;

/// Result type alias for ado-batch operations
///
/// # Examples
///
/// ```
/// use ado_batch::domain::result::Result;
/// use ado_batch::domain::errors::ImportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ImportError::Input("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ImportError>;
