//! In-memory container backend
//!
//! Containers are plain [`Group`] trees registered under a path. Single-read
//! outputs are only committed to the store when their sink is closed, so a
//! sink dropped mid-write leaves nothing behind.

pub mod backend;
pub mod tree;

pub use backend::{MemoryBackend, MemoryRead, MemorySink, MemorySource};
pub use tree::{AttrValue, Group, Node};
