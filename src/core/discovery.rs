//! Source file discovery
//!
//! Resolves the `--input` path to the ordered list of multi-read files to
//! convert.

use crate::domain::{Fast5Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of fast5 files
pub const FAST5_EXTENSION: &str = "fast5";

fn has_fast5_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(FAST5_EXTENSION))
        .unwrap_or(false)
}

/// Find the source files under `input`
///
/// - A file is returned as-is, whatever its extension.
/// - A directory yields its `.fast5` files: the top level only, or the whole
///   tree if `recursive` is set.
///
/// Paths are sorted so that runs over the same tree are reproducible.
/// Entries that cannot be read while walking are logged and skipped.
///
/// # Errors
///
/// Returns [`Fast5Error::Configuration`] if `input` does not exist and
/// [`Fast5Error::Discovery`] if the input directory itself cannot be read.
pub fn discover_sources(input: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(Fast5Error::Configuration(format!(
            "Input path does not exist: {}",
            input.display()
        )));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();
    for entry in WalkDir::new(input)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(Fast5Error::Discovery(format!(
                    "Cannot read input directory {}: {}",
                    input.display(),
                    e
                )));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if entry.file_type().is_file() && has_fast5_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();

    tracing::debug!(
        input = %input.display(),
        recursive,
        count = files.len(),
        "Discovered source files"
    );

    Ok(files)
}
