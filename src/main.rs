// fast5-split - Multi-read to single-read fast5 converter
// Copyright (c) 2025 fast5-split Contributors
// Licensed under the MIT License

use clap::Parser;
use fast5_split::cli::Cli;
use fast5_split::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    let guard = match init_logging(&config.application.log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "fast5-split - multi-read to single-read fast5 converter"
    );

    let exit_code = match cli.convert.execute(&config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Conversion command failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush the file log first
    drop(guard);
    process::exit(exit_code);
}
