//! Configuration management for fast5-split.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! The configuration file is optional. When present it supports:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `FAST5_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! Command line flags take precedence over both the file and the environment.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fast5_split::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("fast5-split.toml")?;
//!
//! println!("Batch size: {}", config.conversion.batch_size);
//! println!("Recursive: {}", config.conversion.recursive);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and progress display
//! - [`ConversionConfig`] - Batch size and recursive search
//! - [`LoggingConfig`] - Local JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! show_progress = true
//!
//! [conversion]
//! batch_size = 4000
//! recursive = false
//!
//! [logging]
//! local_enabled = true
//! local_path = "${FAST5_LOG_DIR}"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_default};
pub use schema::{ApplicationConfig, ConversionConfig, ConverterConfig, LoggingConfig};
