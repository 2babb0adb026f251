//! Domain types for fast5-split.
//!
//! The domain layer provides:
//! - **Error types** ([`Fast5Error`], [`ContainerError`])
//! - **Result type alias** ([`Result`])
//! - **Strongly-typed identifiers** ([`ReadId`])

pub mod errors;
pub mod ids;
pub mod result;

pub use errors::{ContainerError, Fast5Error};
pub use ids::ReadId;
pub use result::Result;
