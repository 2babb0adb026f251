//! Container abstraction layer
//!
//! This module provides a trait-based abstraction over hierarchical container
//! files, allowing the conversion core to work with different backends.

pub mod traits;

pub use traits::{
    Fast5Backend, MultiReadSource, ReadHandle, SingleReadSink,
    FILE_VERSION_ATTR, READ_GROUP_PREFIX, SINGLE_READ_FILE_VERSION,
};
