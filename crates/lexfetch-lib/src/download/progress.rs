use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Receives progress callbacks from a single transfer.
pub trait TransferProgress {
    fn begin(&mut self, name: &str, total_bytes: Option<u64>);
    /// Called after every chunk written, with the cumulative byte count.
    fn advance(&mut self, downloaded_bytes: u64);
    fn finish(&mut self);
    fn abandon(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSnapshot {
    pub downloaded_bytes: u64,
    pub total_bytes: u64,
}

impl ProgressSnapshot {
    /// `None` when the server did not declare a usable content length.
    pub fn new(downloaded_bytes: u64, total_bytes: Option<u64>) -> Option<Self> {
        total_bytes
            .filter(|total| *total > 0)
            .map(|total_bytes| Self {
                downloaded_bytes,
                total_bytes,
            })
    }

    pub fn percent(&self) -> f64 {
        self.downloaded_bytes as f64 / self.total_bytes as f64 * 100.0
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% ({:.1}/{:.1} MB)",
            self.percent(),
            self.downloaded_bytes as f64 / BYTES_PER_MB,
            self.total_bytes as f64 / BYTES_PER_MB
        )
    }
}

/// Terminal progress bar.
#[derive(Default)]
pub struct ConsoleProgress {
    bar: Option<ProgressBar>,
    total_bytes: Option<u64>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransferProgress for ConsoleProgress {
    fn begin(&mut self, name: &str, total_bytes: Option<u64>) {
        self.total_bytes = total_bytes.filter(|total| *total > 0);
        let bar = match self.total_bytes {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template("  {prefix} [{bar:30.cyan/blue}] {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=> "),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("  {prefix} {spinner} {bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_prefix(name.to_string());
        self.bar = Some(bar);
    }

    fn advance(&mut self, downloaded_bytes: u64) {
        let Some(bar) = &self.bar else {
            return;
        };
        bar.set_position(downloaded_bytes);
        if let Some(snapshot) = ProgressSnapshot::new(downloaded_bytes, self.total_bytes) {
            bar.set_message(snapshot.to_string());
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }

    fn abandon(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SilentProgress;

impl TransferProgress for SilentProgress {
    fn begin(&mut self, _name: &str, _total_bytes: Option<u64>) {}
    fn advance(&mut self, _downloaded_bytes: u64) {}
    fn finish(&mut self) {}
    fn abandon(&mut self) {}
}
