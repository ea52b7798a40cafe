use super::plan::{PlanAction, plan_item};
use crate::download::{DownloadSummary, TransferProgress, download_file};
use crate::error::LexFetchError;
use crate::http::{HttpContext, parse_url};
use std::io::{BufRead, Write};
use std::path::Path;
use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectStoreOutcome {
    Completed(DownloadSummary),
    /// The user declined the confirmation prompt.
    Cancelled,
    /// Ctrl-C arrived mid-run; holds the counts up to that point.
    Interrupted(DownloadSummary),
}

/// Builds the download URL by appending the key to the base, as the bucket serves it.
pub fn key_url(download_base_url: &Url, key: &str) -> Result<Url, LexFetchError> {
    parse_url(&format!("{download_base_url}{key}"))
}

/// Prints a preview of `keys` and asks for a yes/no answer. Only `y` proceeds; EOF declines.
pub fn ask_confirmation(
    mut input: impl BufRead,
    mut output: impl Write,
    keys: &[String],
    preview_count: usize,
) -> std::io::Result<bool> {
    writeln!(output, "Found {} files", keys.len())?;
    writeln!(output)?;
    writeln!(output, "First {} files:", preview_count.min(keys.len()))?;
    for (index, key) in keys.iter().take(preview_count).enumerate() {
        writeln!(output, "  {}. {}", index + 1, key)?;
    }
    if keys.len() > preview_count {
        writeln!(output, "  ... and {} more files", keys.len() - preview_count)?;
    }
    writeln!(output)?;
    write!(output, "Do you want to download all these files? (y/n): ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Downloads every key into `<output_dir>/<basename of key>`, serially and without delay.
pub async fn mirror_object_keys<P: TransferProgress>(
    http: &HttpContext,
    keys: &[String],
    download_base_url: &Url,
    output_dir: &Path,
    progress: &mut P,
    summary: &mut DownloadSummary,
) {
    let key_count = keys.len();

    for (index, key) in keys.iter().enumerate() {
        let position = format!("[{}/{}]", index + 1, key_count);
        let planned = match key_url(download_base_url, key)
            .and_then(|url| plan_item(url, key, output_dir))
        {
            Ok(planned) => planned,
            Err(e) => {
                tracing::warn!("{} {}", position, e);
                summary.failed += 1;
                continue;
            }
        };

        if planned.action == PlanAction::Skip {
            tracing::info!("{} Skipping {} (already exists)", position, planned.file_name);
            summary.skipped += 1;
            continue;
        }

        tracing::info!("{} Downloading {}...", position, planned.file_name);
        let result = download_file(http, &planned.url, &planned.destination, progress).await;
        match &result {
            Ok(_) => tracing::info!("Completed {}", planned.file_name),
            Err(e) => tracing::warn!("Error downloading {}: {}", planned.file_name, e),
        }
        summary.record(&result);
    }
}
