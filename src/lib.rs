// fast5-split - Multi-read to single-read fast5 converter
// Copyright (c) 2025 fast5-split Contributors
// Licensed under the MIT License

//! # fast5-split - multi-read to single-read fast5 conversion
//!
//! fast5-split unpacks nanopore multi-read fast5 files, which hold thousands
//! of reads each, into one single-read fast5 file per read.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Discovering** multi-read files under an input path
//! - **Remapping** each read's hierarchy to the single-read layout
//! - **Batching** the outputs into numbered subfolders of a fixed size
//! - **Isolating** failures so one bad read or file never stops the run
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Discovery and conversion logic
//! - [`adapters`] - Container library backends (HDF5, in-memory)
//! - [`domain`] - Error types and identifiers
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Output Layout
//!
//! Every read attempted gets the next value of a run-wide counter, starting
//! at zero. A converted read is written to
//! `<save_path>/<counter / batch_size>/<read_id>.fast5`, with its `Raw` group
//! moved to `Raw/Reads/Read_<read_number>` and its `channel_id`,
//! `context_tags` and `tracking_id` groups moved under `UniqueGlobalKey`.
//!
//! ## Quick Start
//!
//! The coordinator runs over any [`adapters::Fast5Backend`]. With the default
//! `hdf5` feature, `adapters::h5::Hdf5Backend` reads and writes real files;
//! [`adapters::memory::MemoryBackend`] is always available.
//!
//! ```rust,no_run
//! use fast5_split::adapters::Fast5Backend;
//! use fast5_split::core::convert::{
//!     BatchSize, ConversionCoordinator, ConversionSettings, ProgressBarSink,
//! };
//!
//! fn convert<B: Fast5Backend>(backend: B) -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ConversionSettings {
//!         input: "multi_reads/".into(),
//!         save_path: "single_reads/".into(),
//!         batch_size: BatchSize::new(4000)?,
//!         recursive: false,
//!     };
//!
//!     let coordinator = ConversionCoordinator::new(backend, settings);
//!     let summary = coordinator.execute(&mut ProgressBarSink::new())?;
//!
//!     println!("Converted {} reads", summary.reads_converted);
//!     Ok(())
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! convert(fast5_split::adapters::memory::MemoryBackend::new())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`]. Read- and file-level
//! failures are recorded in the run summary rather than returned:
//!
//! ```rust,no_run
//! use fast5_split::domain::Fast5Error;
//!
//! fn example() -> Result<(), Fast5Error> {
//!     let config = fast5_split::config::load_config("fast5-split.toml")?;
//!     println!("Batch size: {}", config.conversion.batch_size);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
