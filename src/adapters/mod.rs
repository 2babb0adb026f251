//! Container library integrations for fast5-split.
//!
//! The conversion core never talks to a container library directly. It goes
//! through the traits in [`container`], which two backends implement:
//!
//! - [`h5`] - HDF5 files on disk (feature `hdf5`, enabled by default)
//! - [`memory`] - in-process container trees, used by tests and embedders
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the HDF5 bindings and
//! enable testing the conversion logic without a system HDF5 library.
//!
//! ```rust
//! use fast5_split::adapters::memory::{AttrValue, Group, MemoryBackend};
//! use fast5_split::adapters::{Fast5Backend, MultiReadSource};
//!
//! let backend = MemoryBackend::new();
//! let raw = Group::new().with_attr("read_number", AttrValue::Int(7));
//! backend.insert_multi_read("run.fast5", [("read-a", Group::new().with_group("Raw", raw))]);
//!
//! let source = backend.open_multi("run.fast5".as_ref()).unwrap();
//! assert_eq!(source.read_ids().unwrap(), vec!["read-a".to_string()]);
//! ```

pub mod container;
#[cfg(feature = "hdf5")]
pub mod h5;
pub mod memory;

pub use container::{
    Fast5Backend, MultiReadSource, ReadHandle, SingleReadSink,
    FILE_VERSION_ATTR, READ_GROUP_PREFIX, SINGLE_READ_FILE_VERSION,
};
