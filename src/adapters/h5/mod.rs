//! HDF5 container backend
//!
//! Multi-read fast5 files are HDF5 files with one `read_<id>` group per read
//! at the root. Single-read files are created fresh (truncating any existing
//! file) and populated with `H5Ocopy` structural clones.

pub mod backend;

pub use backend::{Hdf5Backend, Hdf5Read, Hdf5Sink, Hdf5Source};
