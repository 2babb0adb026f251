//! Conversion orchestration
//!
//! This module provides the core conversion logic, including:
//! - Batch sizing and output subfolder assignment
//! - Read enumeration over multi-read files
//! - Structural remapping to the single-read layout
//! - Conversion coordination, progress and summary

pub mod batch;
pub mod coordinator;
pub mod enumerator;
pub mod progress;
pub mod remap;
pub mod summary;

pub use batch::{subfolder_for, BatchSize};
pub use coordinator::{ConversionCoordinator, ConversionSettings};
pub use enumerator::ReadEnumerator;
pub use progress::{NoProgress, ProgressBarSink, ProgressSink};
pub use remap::{apply_plan, plan_read, GlobalKeyField, GroupKind, Placement, RemapPlan};
pub use summary::{ConversionFailure, ConversionSummary, FailureKind};
