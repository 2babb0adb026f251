//! Batch allocation of single-read outputs
//!
//! Outputs are spread across numbered subfolders of the save path. The
//! subfolder of a read is a pure function of the global read counter at the
//! time the read is attempted.

use crate::domain::{Fast5Error, Result};
use std::fmt;
use std::num::NonZeroU64;

/// Number of reads placed in each output subfolder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchSize(NonZeroU64);

impl BatchSize {
    /// Batch size used when none is configured
    pub const DEFAULT: u64 = 4000;

    /// Validate a configured batch size
    ///
    /// # Errors
    ///
    /// Returns [`Fast5Error::Configuration`] if `value` is zero or negative.
    pub fn new(value: i64) -> Result<Self> {
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(|| {
                Fast5Error::Configuration(format!(
                    "batch_size must be a positive integer, got {value}"
                ))
            })
    }

    /// The batch size as an integer
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(NonZeroU64::new(Self::DEFAULT).unwrap_or(NonZeroU64::MIN))
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subfolder index for the read attempted at `counter`
///
/// `floor(counter / batch_size)`; never divides by zero since a
/// [`BatchSize`] is always at least 1.
pub fn subfolder_for(counter: u64, batch_size: BatchSize) -> u64 {
    counter / batch_size.get()
}
