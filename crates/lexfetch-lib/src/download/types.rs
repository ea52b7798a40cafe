use crate::error::LexFetchError;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Destination already existed; nothing was requested.
    Skipped,
    Downloaded { bytes: u64 },
}

/// Running counters for one orchestration run. Nothing is persisted across runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl DownloadSummary {
    pub fn record(&mut self, result: &Result<FetchOutcome, LexFetchError>) {
        match result {
            Ok(FetchOutcome::Downloaded { .. }) => self.downloaded += 1,
            Ok(FetchOutcome::Skipped) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// Items that are present locally after the run, whether fetched now or earlier.
    pub fn successful(&self) -> usize {
        self.downloaded + self.skipped
    }

    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.failed
    }
}

impl fmt::Display for DownloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "downloaded: {}, skipped: {}, failed: {}",
            self.downloaded, self.skipped, self.failed
        )
    }
}
