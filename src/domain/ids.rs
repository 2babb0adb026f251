//! Domain identifier types with validation

use std::fmt;
use std::str::FromStr;

/// Read identifier newtype wrapper
///
/// Identifies one read inside a multi-read container. The id doubles as the
/// output file stem, so it must be non-empty and must not contain path
/// separators.
///
/// # Examples
///
/// ```
/// use fast5_split::domain::ids::ReadId;
/// use std::str::FromStr;
///
/// let read_id = ReadId::from_str("0a1b2c3d-4e5f-6789-abcd-ef0123456789").unwrap();
/// assert_eq!(read_id.file_name(), "0a1b2c3d-4e5f-6789-abcd-ef0123456789.fast5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReadId(String);

impl ReadId {
    /// Creates a new ReadId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(ReadId)` if the id is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Read ID cannot be empty".to_string());
        }
        if id.contains('/') || id.contains('\\') || id == "." || id == ".." {
            return Err(format!("Read ID '{id}' is not a valid file name"));
        }
        Ok(Self(id))
    }

    /// Returns the read id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Single-read output file name for this read
    pub fn file_name(&self) -> String {
        format!("{}.fast5", self.0)
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ReadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReadId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ReadId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
