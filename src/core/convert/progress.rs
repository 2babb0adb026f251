//! Progress reporting for conversion runs

use indicatif::{ProgressBar, ProgressStyle};

/// Sink receiving conversion progress
///
/// The coordinator calls [`start`](ProgressSink::start) once with the total
/// read count, [`set_position`](ProgressSink::set_position) after every read
/// attempt, and [`finish`](ProgressSink::finish) at the end of the run.
pub trait ProgressSink {
    fn start(&mut self, total: u64);
    fn set_position(&mut self, position: u64);
    fn finish(&mut self);
}

/// Progress sink that ignores every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&mut self, _total: u64) {}
    fn set_position(&mut self, _position: u64) {}
    fn finish(&mut self) {}
}

/// Terminal progress bar
#[derive(Default)]
pub struct ProgressBarSink {
    bar: Option<ProgressBar>,
}

impl ProgressBarSink {
    pub fn new() -> Self {
        Self::default()
    }
}

fn default_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    match ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} reads ({eta})",
    ) {
        Ok(style) => pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  ")),
        Err(e) => tracing::debug!(error = %e, "Falling back to default progress style"),
    }
    pb
}

impl ProgressSink for ProgressBarSink {
    fn start(&mut self, total: u64) {
        self.bar = Some(default_progress_bar(total));
    }

    fn set_position(&mut self, position: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(position);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}
