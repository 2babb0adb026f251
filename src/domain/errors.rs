//! Domain error types
//!
//! This module defines the error hierarchy for fast5-split.
//! Errors are domain-specific and don't expose the container library's types.

use std::path::PathBuf;
use thiserror::Error;

/// Main conversion error type
///
/// Each variant corresponds to one granularity of failure: configuration errors
/// abort the run before any file is opened, `Open` failures skip a whole source
/// file, and `MissingRead`/`Extract`/`Remap`/`Write` failures skip one read.
#[derive(Debug, Error)]
pub enum Fast5Error {
    /// Configuration-related errors (invalid batch size, missing paths)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A source container could not be opened or enumerated
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },

    /// A listed read id is no longer present in its source container
    #[error("Read '{read_id}' not found in {path}")]
    MissingRead { read_id: String, path: PathBuf },

    /// A listed read could not be fetched from its source container
    #[error("Failed to extract read '{read_id}' from {path}: {source}")]
    Extract {
        read_id: String,
        path: PathBuf,
        #[source]
        source: ContainerError,
    },

    /// A read's hierarchy could not be mapped to the single-read layout
    #[error("Failed to remap read '{read_id}': {reason}")]
    Remap { read_id: String, reason: String },

    /// A single-read output file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },

    /// Source discovery errors
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Container-library errors
///
/// Errors raised by a [`Fast5Backend`](crate::adapters::Fast5Backend)
/// implementation. Backends translate their library's errors into these.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The path is missing, unreadable, or not a valid container
    #[error("cannot open container: {0}")]
    Unreadable(String),

    /// The container could not be created
    #[error("cannot create container: {0}")]
    CreateFailed(String),

    /// A named member does not exist
    #[error("member not found: {0}")]
    MemberNotFound(String),

    /// A named attribute does not exist
    #[error("attribute '{attribute}' not found on '{member}'")]
    AttributeNotFound { member: String, attribute: String },

    /// An attribute exists but does not hold an integer
    #[error("attribute '{attribute}' on '{member}' is not an integer")]
    AttributeType { member: String, attribute: String },

    /// Copying a subtree failed
    #[error("failed to copy '{from}' to '{to}': {reason}")]
    CopyFailed {
        from: String,
        to: String,
        reason: String,
    },

    /// Creating a group failed
    #[error("failed to create group '{path}': {reason}")]
    GroupCreation { path: String, reason: String },

    /// Any other library failure
    #[error("{0}")]
    Library(String),
}

impl Fast5Error {
    /// Process exit code for an error that aborted the run
    ///
    /// Configuration errors exit with 2, everything else with 5.
    pub fn exit_code(&self) -> i32 {
        match self {
            Fast5Error::Configuration(_) => 2,
            _ => 5,
        }
    }
}
