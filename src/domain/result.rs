//! Result type alias for fast5-split

use super::errors::Fast5Error;

/// Result type alias for conversion operations
///
/// # Examples
///
/// ```
/// use fast5_split::domain::result::Result;
/// use fast5_split::domain::errors::Fast5Error;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(Fast5Error::Configuration("batch_size must be >= 1".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Fast5Error>;
