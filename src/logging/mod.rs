//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Human-readable console output on stderr
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use fast5_split::logging::init_logging;
//! use fast5_split::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a read that was skipped
///
/// # Example
///
/// ```no_run
/// use fast5_split::log_read_failure;
/// use fast5_split::domain::Fast5Error;
/// use std::path::Path;
///
/// let error = Fast5Error::Remap {
///     read_id: "r1".to_string(),
///     reason: "missing read_number".to_string(),
/// };
/// log_read_failure!(Path::new("batch_0.fast5"), "r1", &error);
/// ```
#[macro_export]
macro_rules! log_read_failure {
    ($path:expr, $read_id:expr, $error:expr) => {
        tracing::error!(
            path = %$path.display(),
            read_id = %$read_id,
            error = %$error,
            "Failed to convert read"
        );
    };
}

/// Log a source file that was skipped
///
/// # Example
///
/// ```no_run
/// use fast5_split::log_file_failure;
/// use fast5_split::domain::Fast5Error;
/// use std::path::Path;
///
/// let error = Fast5Error::Discovery("unreadable".to_string());
/// log_file_failure!(Path::new("batch_0.fast5"), &error);
/// ```
#[macro_export]
macro_rules! log_file_failure {
    ($path:expr, $error:expr) => {
        tracing::error!(
            path = %$path.display(),
            error = %$error,
            "Failed to convert source file"
        );
    };
}
