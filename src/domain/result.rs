//! Result type alias for ermask

use super::errors::MaskError;

/// Result type alias for ermask operations
///
/// # Examples
///
/// ```
/// use ermask::domain::result::Result;
/// use ermask::domain::errors::MaskError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MaskError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MaskError>;
