//! Convert command implementation
//!
//! Splits every multi-read file under `--input` into single-read files under
//! `--save_path`.

use crate::adapters::Fast5Backend;
use crate::config::ConverterConfig;
use crate::core::convert::{
    BatchSize, ConversionCoordinator, ConversionSettings, ConversionSummary, FailureKind,
    NoProgress, ProgressBarSink, ProgressSink,
};
use crate::domain::Result;
use clap::Args;
use std::path::PathBuf;

/// Number of failures listed in the printed summary
const MAX_LISTED_FAILURES: usize = 10;

/// Arguments for the conversion
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Multi-read fast5 file, or directory of multi-read fast5 files
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Root directory of the single-read output, created if missing
    #[arg(short = 's', long = "save_path", alias = "save-path")]
    pub save_path: PathBuf,

    /// Number of single-read files per output subfolder [default: 4000]
    #[arg(
        short = 'n',
        long = "batch_size",
        alias = "batch-size",
        allow_negative_numbers = true
    )]
    pub batch_size: Option<i64>,

    /// Search the input directory recursively
    #[arg(long)]
    pub recursive: bool,

    /// Do not draw a progress bar
    #[arg(long = "no_progress", alias = "no-progress")]
    pub no_progress: bool,
}

impl ConvertArgs {
    /// Apply the command line flags on top of `config`
    pub fn apply_overrides(&self, config: &mut ConverterConfig) {
        if let Some(batch_size) = self.batch_size {
            tracing::debug!(batch_size, "Overriding batch size from CLI");
            config.conversion.batch_size = batch_size;
        }
        if self.recursive {
            config.conversion.recursive = true;
        }
        if self.no_progress {
            config.application.show_progress = false;
        }
    }

    /// Conversion settings for these paths under `config`
    ///
    /// # Errors
    ///
    /// Returns [`Fast5Error::Configuration`](crate::domain::Fast5Error::Configuration) if the batch size is not positive.
    pub fn settings(&self, config: &ConverterConfig) -> Result<ConversionSettings> {
        Ok(ConversionSettings {
            input: self.input.clone(),
            save_path: self.save_path.clone(),
            batch_size: BatchSize::new(config.conversion.batch_size)?,
            recursive: config.conversion.recursive,
        })
    }

    /// Execute the conversion
    ///
    /// Returns the process exit code: 0 once every discoverable read has been
    /// attempted (even if some failed), 2 on a configuration error and 5 on a
    /// fatal error.
    pub fn execute(&self, config: &ConverterConfig) -> anyhow::Result<i32> {
        let settings = match self.settings(config) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!(error = %e, "Invalid conversion settings");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        Ok(run_with_default_backend(
            settings,
            config.application.show_progress,
        ))
    }
}

#[cfg(feature = "hdf5")]
fn run_with_default_backend(settings: ConversionSettings, show_progress: bool) -> i32 {
    run(crate::adapters::h5::Hdf5Backend::new(), settings, show_progress)
}

#[cfg(not(feature = "hdf5"))]
fn run_with_default_backend(_settings: ConversionSettings, _show_progress: bool) -> i32 {
    tracing::error!("Built without the hdf5 feature");
    eprintln!("This build has no fast5 container support; rebuild with --features hdf5");
    2
}

/// Run a conversion on `backend` and print its summary
///
/// Returns the process exit code.
pub fn run<B: Fast5Backend>(backend: B, settings: ConversionSettings, show_progress: bool) -> i32 {
    let mut progress: Box<dyn ProgressSink> = if show_progress {
        Box::new(ProgressBarSink::new())
    } else {
        Box::new(NoProgress)
    };

    let coordinator = ConversionCoordinator::new(backend, settings);
    match coordinator.execute(progress.as_mut()) {
        Ok(summary) => {
            print_summary(&summary);
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "Conversion failed");
            eprintln!("Conversion failed: {e}");
            e.exit_code()
        }
    }
}

fn print_summary(summary: &ConversionSummary) {
    println!();
    println!("Conversion Summary:");
    println!(
        "  Source files: {} ({} failed)",
        summary.files_discovered, summary.files_failed
    );
    println!("  Reads attempted: {}", summary.reads_attempted);
    println!("  Converted: {}", summary.reads_converted);
    println!("  Failed: {}", summary.reads_failed);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());

    if !summary.failures.is_empty() {
        println!();
        println!("Failures:");
        for failure in summary.failures.iter().take(MAX_LISTED_FAILURES) {
            match (failure.kind, &failure.read_id) {
                (FailureKind::Read, Some(read_id)) => println!(
                    "  - read {} in {}: {}",
                    read_id,
                    failure.source_path.display(),
                    failure.message
                ),
                _ => println!(
                    "  - file {}: {}",
                    failure.source_path.display(),
                    failure.message
                ),
            }
        }
        if summary.failures.len() > MAX_LISTED_FAILURES {
            println!(
                "  ... and {} more failures",
                summary.failures.len() - MAX_LISTED_FAILURES
            );
        }
    }
    println!();
}
