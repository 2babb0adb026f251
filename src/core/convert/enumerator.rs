//! Read enumeration over multi-read source files
//!
//! Wraps a [`Fast5Backend`] and translates container errors into the
//! file-level and read-level failures of the conversion taxonomy.

use crate::adapters::{Fast5Backend, MultiReadSource};
use crate::domain::{Fast5Error, ReadId, Result};
use std::path::{Path, PathBuf};

/// Enumerates the reads of multi-read files through a backend
pub struct ReadEnumerator<'a, B: Fast5Backend> {
    backend: &'a B,
}

impl<'a, B: Fast5Backend> ReadEnumerator<'a, B> {
    /// Create an enumerator over `backend`
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Open a multi-read file
    ///
    /// The returned source releases the file when dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Fast5Error::Open`] if the file cannot be opened.
    pub fn open(&self, path: &Path) -> Result<B::Source> {
        self.backend
            .open_multi(path)
            .map_err(|source| Fast5Error::Open {
                path: path.to_path_buf(),
                source,
            })
    }

    /// List the read ids held in an opened file
    ///
    /// # Errors
    ///
    /// Returns [`Fast5Error::Open`]: a file whose reads cannot be listed is
    /// treated the same as one that cannot be opened.
    pub fn list_ids(&self, source: &B::Source, path: &Path) -> Result<Vec<String>> {
        source.read_ids().map_err(|source| Fast5Error::Open {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the handle of one read
    ///
    /// # Errors
    ///
    /// Returns [`Fast5Error::MissingRead`] if the read is absent, which can
    /// happen if the file changes between listing and reading, and
    /// [`Fast5Error::Extract`] if the backend fails to fetch it.
    pub fn get_read(&self, source: &B::Source, path: &Path, read_id: &ReadId) -> Result<B::Read> {
        match source.read(read_id.as_str()) {
            Ok(Some(read)) => Ok(read),
            Ok(None) => Err(Fast5Error::MissingRead {
                read_id: read_id.to_string(),
                path: path.to_path_buf(),
            }),
            Err(source) => Err(Fast5Error::Extract {
                read_id: read_id.to_string(),
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Total number of reads across `paths`
    ///
    /// Opens and closes every file once. Files that cannot be opened or
    /// listed contribute zero; they are reported again during conversion.
    pub fn count_records(&self, paths: &[PathBuf]) -> u64 {
        let mut count = 0_u64;
        for path in paths {
            let ids = self
                .open(path)
                .and_then(|source| self.list_ids(&source, path));
            match ids {
                Ok(ids) => count += ids.len() as u64,
                Err(e) => {
                    tracing::debug!(
                        path = %path.display(),
                        error = %e,
                        "Could not count reads, counting as zero"
                    );
                }
            }
        }
        count
    }
}
