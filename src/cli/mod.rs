//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for fast5-split using clap.

pub mod commands;

use crate::config::{load_config, load_default, ConverterConfig};
use crate::domain::{Fast5Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// Split multi-read fast5 files into batched single-read fast5 files
#[derive(Parser, Debug)]
#[command(name = "multi_to_single_fast5")]
#[command(version, about, long_about = None)]
#[command(author = "fast5-split Contributors")]
pub struct Cli {
    /// Path to an optional configuration file
    #[arg(short, long, env = "FAST5_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FAST5_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(flatten)]
    pub convert: commands::convert::ConvertArgs,
}

impl Cli {
    /// Build the effective configuration
    ///
    /// Loads the configuration file if one was given (defaults otherwise),
    /// applies command line overrides and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`Fast5Error::Configuration`] on any loading or validation
    /// failure.
    pub fn resolve_config(&self) -> Result<ConverterConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => load_default()?,
        };

        if let Some(level) = &self.log_level {
            config.application.log_level = level.to_lowercase();
        }
        self.convert.apply_overrides(&mut config);

        config.validate().map_err(|e| {
            Fast5Error::Configuration(format!("Configuration validation failed: {}", e))
        })?;
        Ok(config)
    }
}
