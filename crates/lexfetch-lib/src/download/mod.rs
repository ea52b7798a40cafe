mod fetch;
mod progress;
mod types;

pub use fetch::download_file;
pub use progress::{ConsoleProgress, ProgressSnapshot, SilentProgress, TransferProgress};
pub use types::{DownloadSummary, FetchOutcome};
