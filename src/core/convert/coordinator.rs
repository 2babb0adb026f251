//! Conversion coordinator - main orchestrator for the conversion process
//!
//! This module drives the whole run: discovering source files, enumerating
//! the reads of each, remapping and writing every read to its own
//! single-read file, and isolating failures at read and file granularity.

use crate::adapters::{Fast5Backend, SingleReadSink};
use crate::core::convert::batch::{subfolder_for, BatchSize};
use crate::core::convert::enumerator::ReadEnumerator;
use crate::core::convert::progress::ProgressSink;
use crate::core::convert::remap::{apply_plan, plan_read, RemapPlan};
use crate::core::convert::summary::ConversionSummary;
use crate::core::discovery::discover_sources;
use crate::domain::{ContainerError, Fast5Error, ReadId, Result};
use crate::{log_file_failure, log_read_failure};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Settings of one conversion run
#[derive(Debug, Clone)]
pub struct ConversionSettings {
    /// Multi-read file, or directory of multi-read files
    pub input: PathBuf,
    /// Root directory of the batched single-read output
    pub save_path: PathBuf,
    /// Reads per output subfolder
    pub batch_size: BatchSize,
    /// Search `input` recursively
    pub recursive: bool,
}

/// Conversion coordinator
///
/// Owns the global read counter for the duration of [`execute`](Self::execute).
/// The counter advances exactly once per listed read, whether the read was
/// converted or failed, and determines the read's output subfolder.
pub struct ConversionCoordinator<B: Fast5Backend> {
    backend: B,
    settings: ConversionSettings,
}

impl<B: Fast5Backend> ConversionCoordinator<B> {
    /// Create a new conversion coordinator
    pub fn new(backend: B, settings: ConversionSettings) -> Self {
        Self { backend, settings }
    }

    /// Output path of a read attempted at `counter`
    pub fn output_path(&self, read_id: &ReadId, counter: u64) -> PathBuf {
        let subfolder = subfolder_for(counter, self.settings.batch_size);
        self.settings
            .save_path
            .join(subfolder.to_string())
            .join(read_id.file_name())
    }

    /// Execute the conversion
    ///
    /// This is the main entry point. It:
    /// 1. Discovers the source files
    /// 2. Creates the save path
    /// 3. Counts every read upfront to size the progress sink
    /// 4. Converts each source file in turn, threading the read counter through
    /// 5. Generates the summary
    ///
    /// # Errors
    ///
    /// Only fatal conditions are returned: a missing input path or a save
    /// path that cannot be created. Read and file failures are recorded in
    /// the summary instead.
    pub fn execute(&self, progress: &mut dyn ProgressSink) -> Result<ConversionSummary> {
        let start_time = Instant::now();
        let mut summary = ConversionSummary::new();

        tracing::info!(
            input = %self.settings.input.display(),
            save_path = %self.settings.save_path.display(),
            batch_size = %self.settings.batch_size,
            recursive = self.settings.recursive,
            "Starting conversion"
        );

        let files = discover_sources(&self.settings.input, self.settings.recursive)?;
        summary.files_discovered = files.len();

        fs::create_dir_all(&self.settings.save_path).map_err(|e| {
            Fast5Error::Io(format!(
                "Failed to create save path {}: {}",
                self.settings.save_path.display(),
                e
            ))
        })?;

        let enumerator = ReadEnumerator::new(&self.backend);
        summary.reads_expected = enumerator.count_records(&files);
        tracing::info!(
            files = files.len(),
            reads = summary.reads_expected,
            "Counted reads"
        );
        progress.start(summary.reads_expected);

        let mut counter = 0_u64;
        for path in &files {
            match self.convert_file(&enumerator, path, counter, progress, &mut summary) {
                Ok(next) => {
                    tracing::debug!(
                        path = %path.display(),
                        reads = next - counter,
                        "Finished source file"
                    );
                    counter = next;
                }
                Err(e) => {
                    log_file_failure!(path, &e);
                    summary.add_file_failure(path, &e);
                }
            }
        }

        progress.finish();
        summary.reads_attempted = counter;
        summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    /// Convert every read of one source file
    ///
    /// Returns the counter after the file's last read. An error means the
    /// file could not be opened or listed; no read was attempted and the
    /// counter is unchanged. The source is released on return either way.
    fn convert_file(
        &self,
        enumerator: &ReadEnumerator<'_, B>,
        path: &Path,
        mut counter: u64,
        progress: &mut dyn ProgressSink,
        summary: &mut ConversionSummary,
    ) -> Result<u64> {
        let source = enumerator.open(path)?;
        let read_ids = enumerator.list_ids(&source, path)?;

        tracing::debug!(
            path = %path.display(),
            reads = read_ids.len(),
            "Converting source file"
        );

        for raw_id in &read_ids {
            match self.convert_read(enumerator, &source, path, raw_id, counter) {
                Ok(output) => {
                    tracing::trace!(
                        read_id = %raw_id,
                        output = %output.display(),
                        "Converted read"
                    );
                    summary.add_converted();
                }
                Err(e) => {
                    log_read_failure!(path, raw_id, &e);
                    summary.add_read_failure(path, raw_id, &e);
                }
            }
            counter += 1;
            progress.set_position(counter);
        }

        Ok(counter)
    }

    /// Convert one read into its own single-read file
    fn convert_read(
        &self,
        enumerator: &ReadEnumerator<'_, B>,
        source: &B::Source,
        path: &Path,
        raw_id: &str,
        counter: u64,
    ) -> Result<PathBuf> {
        let read_id = ReadId::new(raw_id).map_err(|reason| Fast5Error::Remap {
            read_id: raw_id.to_string(),
            reason,
        })?;
        let read = enumerator.get_read(source, path, &read_id)?;
        let plan = plan_read(&read_id, &read)?;

        let output = self.output_path(&read_id, counter);
        if let Some(dir) = output.parent() {
            fs::create_dir_all(dir).map_err(|e| Fast5Error::Write {
                path: dir.to_path_buf(),
                source: ContainerError::CreateFailed(e.to_string()),
            })?;
        }

        self.write_single(&output, &plan, &read)?;
        Ok(output)
    }

    /// Create, populate and close one single-read file
    ///
    /// On failure the sink is dropped (closing the file) and the partial file
    /// is removed, so a failed read never leaves an output behind.
    fn write_single(&self, output: &Path, plan: &RemapPlan, read: &B::Read) -> Result<()> {
        let write_error = |source: ContainerError| Fast5Error::Write {
            path: output.to_path_buf(),
            source,
        };

        let mut sink = match self.backend.create_single(output) {
            Ok(sink) => sink,
            Err(e) => {
                discard_partial(output);
                return Err(write_error(e));
            }
        };
        if let Err(e) = apply_plan(plan, read, &mut sink) {
            drop(sink);
            discard_partial(output);
            return Err(write_error(e));
        }
        if let Err(e) = sink.close() {
            discard_partial(output);
            return Err(write_error(e));
        }
        Ok(())
    }
}

fn discard_partial(output: &Path) {
    match fs::remove_file(output) {
        Ok(()) => {
            tracing::debug!(output = %output.display(), "Removed partial output file");
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(
                output = %output.display(),
                error = %e,
                "Failed to remove partial output file"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{AttrValue, Group, MemoryBackend};
    use crate::core::convert::progress::NoProgress;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingProgress {
        total: Option<u64>,
        positions: Vec<u64>,
        finished: bool,
    }

    impl ProgressSink for RecordingProgress {
        fn start(&mut self, total: u64) {
            self.total = Some(total);
        }
        fn set_position(&mut self, position: u64) {
            self.positions.push(position);
        }
        fn finish(&mut self) {
            self.finished = true;
        }
    }

    fn read(read_number: i64) -> Group {
        Group::new()
            .with_group(
                "Raw",
                Group::new()
                    .with_attr("read_number", AttrValue::Int(read_number))
                    .with_dataset("Signal", vec![1, 2]),
            )
            .with_group("channel_id", Group::new())
    }

    fn settings(dir: &TempDir, batch_size: i64) -> ConversionSettings {
        ConversionSettings {
            input: dir.path().join("in"),
            save_path: dir.path().join("out"),
            batch_size: BatchSize::new(batch_size).unwrap(),
            recursive: false,
        }
    }

    fn register(backend: &MemoryBackend, dir: &TempDir, name: &str, reads: Vec<(&str, Group)>) {
        let path = dir.path().join("in").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
        backend.insert_multi_read(path, reads);
    }

    #[test]
    fn test_output_path_layout() {
        let dir = TempDir::new().unwrap();
        let coordinator = ConversionCoordinator::new(MemoryBackend::new(), settings(&dir, 2));
        let id = ReadId::new("abc").unwrap();

        assert_eq!(
            coordinator.output_path(&id, 0),
            dir.path().join("out").join("0").join("abc.fast5")
        );
        assert_eq!(
            coordinator.output_path(&id, 5),
            dir.path().join("out").join("2").join("abc.fast5")
        );
    }

    #[test]
    fn test_counter_spans_files_and_batches() {
        let dir = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        register(&backend, &dir, "a.fast5", vec![("r1", read(1)), ("r2", read(2))]);
        register(&backend, &dir, "b.fast5", vec![("r3", read(3))]);

        let coordinator = ConversionCoordinator::new(backend.clone(), settings(&dir, 2));
        let mut progress = RecordingProgress::default();
        let summary = coordinator.execute(&mut progress).unwrap();

        assert_eq!(summary.reads_attempted, 3);
        assert_eq!(summary.reads_converted, 3);
        assert_eq!(progress.total, Some(3));
        assert_eq!(progress.positions, vec![1, 2, 3]);
        assert!(progress.finished);

        let out = dir.path().join("out");
        assert!(backend.file(out.join("0").join("r1.fast5")).is_some());
        assert!(backend.file(out.join("0").join("r2.fast5")).is_some());
        assert!(backend.file(out.join("1").join("r3.fast5")).is_some());
    }

    #[test]
    fn test_failed_read_still_advances_counter() {
        let dir = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        let broken = Group::new().with_group("Raw", Group::new());
        register(
            &backend,
            &dir,
            "a.fast5",
            vec![("r1", read(1)), ("r2", broken), ("r3", read(3))],
        );

        let coordinator = ConversionCoordinator::new(backend.clone(), settings(&dir, 1));
        let summary = coordinator.execute(&mut NoProgress).unwrap();

        assert_eq!(summary.reads_attempted, 3);
        assert_eq!(summary.reads_converted, 2);
        assert_eq!(summary.reads_failed, 1);

        let out = dir.path().join("out");
        assert!(backend.file(out.join("0").join("r1.fast5")).is_some());
        assert!(backend.file(out.join("1").join("r2.fast5")).is_none());
        assert!(backend.file(out.join("2").join("r3.fast5")).is_some());
    }

    #[test]
    fn test_write_failure_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        backend.fail_copies_of("channel_id");
        register(&backend, &dir, "a.fast5", vec![("r1", read(1))]);

        let coordinator = ConversionCoordinator::new(backend.clone(), settings(&dir, 10));
        let summary = coordinator.execute(&mut NoProgress).unwrap();

        assert_eq!(summary.reads_failed, 1);
        assert!(summary.failures[0].message.contains("channel_id"));
        assert!(backend.files_under(dir.path().join("out")).is_empty());
    }

    #[test]
    fn test_create_failure_removes_file_and_advances_counter() {
        let dir = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        backend.fail_creates_of("r1.fast5");
        register(&backend, &dir, "a.fast5", vec![("r1", read(1)), ("r2", read(2))]);

        let coordinator = ConversionCoordinator::new(backend.clone(), settings(&dir, 1));
        let summary = coordinator.execute(&mut NoProgress).unwrap();

        assert_eq!(summary.reads_attempted, 2);
        assert_eq!(summary.reads_failed, 1);
        assert_eq!(summary.failures[0].read_id.as_deref(), Some("r1"));
        let out = dir.path().join("out");
        assert!(!out.join("0").join("r1.fast5").exists());
        assert!(backend.file(out.join("1").join("r2.fast5")).is_some());
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let coordinator = ConversionCoordinator::new(MemoryBackend::new(), settings(&dir, 10));
        let err = coordinator.execute(&mut NoProgress).unwrap_err();
        assert!(matches!(err, Fast5Error::Configuration(_)));
    }

    #[test]
    fn test_invalid_read_id_is_read_failure() {
        let dir = TempDir::new().unwrap();
        let backend = MemoryBackend::new();
        register(&backend, &dir, "a.fast5", vec![("..", read(1)), ("ok", read(2))]);

        let coordinator = ConversionCoordinator::new(backend.clone(), settings(&dir, 10));
        let summary = coordinator.execute(&mut NoProgress).unwrap();

        assert_eq!(summary.reads_attempted, 2);
        assert_eq!(summary.reads_failed, 1);
        assert_eq!(summary.failures[0].read_id.as_deref(), Some(".."));
        assert!(backend
            .file(dir.path().join("out").join("0").join("ok.fast5"))
            .is_some());
    }
}
