//! Container abstraction traits
//!
//! This module defines the traits that container backends must implement
//! to be driven by the conversion core.
//!
//! A backend hands out three kinds of handles:
//! - a [`MultiReadSource`] for an opened multi-read file,
//! - a [`ReadHandle`] for one read group inside it,
//! - a [`SingleReadSink`] for a newly created single-read file.
//!
//! Handles release their underlying resources when dropped, so a source or
//! sink is closed on every exit path, including early returns on error.

use crate::domain::ContainerError;
use std::path::Path;

/// Name prefix of the per-read groups at the root of a multi-read file
pub const READ_GROUP_PREFIX: &str = "read_";

/// Root attribute written to every new single-read file
pub const FILE_VERSION_ATTR: &str = "file_version";

/// Value of [`FILE_VERSION_ATTR`] on new single-read files
pub const SINGLE_READ_FILE_VERSION: f64 = 2.0;

/// Container backend
///
/// Ties a source handle, a read handle and a sink handle together so that a
/// sink can copy members straight out of a read belonging to the same backend.
pub trait Fast5Backend {
    /// Handle to one read inside an opened multi-read file
    type Read: ReadHandle;

    /// Opened multi-read file
    type Source: MultiReadSource<Read = Self::Read>;

    /// Newly created single-read file
    type Sink: SingleReadSink<Read = Self::Read>;

    /// Open a multi-read file read-only
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::Unreadable`] if the path does not exist, is
    /// not a valid container, or cannot be read.
    fn open_multi(&self, path: &Path) -> Result<Self::Source, ContainerError>;

    /// Create (or truncate) a single-read file
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::CreateFailed`] if the file cannot be created.
    fn create_single(&self, path: &Path) -> Result<Self::Sink, ContainerError>;
}

/// An opened multi-read file
pub trait MultiReadSource {
    /// Read handle type produced by this source
    type Read;

    /// List the ids of every read held in the file
    ///
    /// Every read appears exactly once. Order is deterministic per backend
    /// but not otherwise specified.
    fn read_ids(&self) -> Result<Vec<String>, ContainerError>;

    /// Get a handle to one read
    ///
    /// Returns `Ok(None)` if no read with this id exists.
    fn read(&self, read_id: &str) -> Result<Option<Self::Read>, ContainerError>;
}

/// One read group inside a multi-read file
pub trait ReadHandle {
    /// Names of the top-level members of the read group
    fn member_names(&self) -> Result<Vec<String>, ContainerError>;

    /// Read an integer attribute of a top-level member
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::MemberNotFound`] if the member is absent,
    /// [`ContainerError::AttributeNotFound`] if the attribute is absent, and
    /// [`ContainerError::AttributeType`] if it does not hold an integer.
    fn int_attr(&self, member: &str, attribute: &str) -> Result<i64, ContainerError>;
}

/// A single-read file being written
pub trait SingleReadSink {
    /// Read handle type this sink can copy from
    type Read;

    /// Whether an object exists at the slash-separated `path`
    fn contains(&self, path: &str) -> bool;

    /// Create a group at `path`; its parent must already exist
    fn create_group(&mut self, path: &str) -> Result<(), ContainerError>;

    /// Copy the top-level `member` of `read` to `destination`
    ///
    /// The copy is a structural clone of the whole subtree (attributes,
    /// datasets, nested groups). The parent of `destination` must exist.
    fn copy_member(
        &mut self,
        read: &Self::Read,
        member: &str,
        destination: &str,
    ) -> Result<(), ContainerError>;

    /// Flush and close the file
    fn close(self) -> Result<(), ContainerError>;

    /// Create every missing group along `path`
    ///
    /// Idempotent: groups that already exist are left untouched.
    fn ensure_group(&mut self, path: &str) -> Result<(), ContainerError> {
        let mut current = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(part);
            if !self.contains(&current) {
                self.create_group(&current)?;
            }
        }
        Ok(())
    }
}
