//! Core conversion logic for fast5-split.
//!
//! # Modules
//!
//! - [`discovery`] - Resolving the input path to the list of source files
//! - [`convert`] - Enumeration, remapping, batching and coordination
//!
//! # Conversion Workflow
//!
//! 1. **Discover**: List the multi-read files under the input path
//! 2. **Count**: Sum the reads of every file to size progress reporting
//! 3. **Convert**: For each read, plan its single-read layout, then write it
//!    to `<save_path>/<counter / batch_size>/<read_id>.fast5`
//! 4. **Report**: Generate the conversion summary
//!
//! # Example
//!
//! ```rust,no_run
//! use fast5_split::adapters::memory::MemoryBackend;
//! use fast5_split::core::convert::{
//!     BatchSize, ConversionCoordinator, ConversionSettings, NoProgress,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ConversionSettings {
//!     input: "runs/".into(),
//!     save_path: "single/".into(),
//!     batch_size: BatchSize::new(4000)?,
//!     recursive: true,
//! };
//! let coordinator = ConversionCoordinator::new(MemoryBackend::new(), settings);
//! let summary = coordinator.execute(&mut NoProgress)?;
//!
//! println!("Converted: {}", summary.reads_converted);
//! println!("Failed: {}", summary.reads_failed);
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod discovery;
