use super::plan::{PlanAction, plan_item};
use crate::discovery::TreeHostDiscoverer;
use crate::download::{DownloadSummary, TransferProgress, download_file};
use crate::error::LexFetchError;
use crate::http::HttpContext;
use crate::utils::decoded_url_path;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct TreeHostRun {
    pub output_dir: PathBuf,
    /// Only the first `limit` reporters are processed.
    pub limit: Option<usize>,
    /// Pause after every transfer attempt, successful or not.
    pub request_delay: Duration,
}

/// Mirrors every reporter's archives into `<output_dir>/<reporter>/`, one file at a time.
///
/// `summary` is updated after each item so the counts survive if the caller cancels this future.
pub async fn mirror_tree_host<P: TransferProgress>(
    discoverer: &TreeHostDiscoverer,
    http: &HttpContext,
    run: &TreeHostRun,
    progress: &mut P,
    summary: &mut DownloadSummary,
) -> Result<(), LexFetchError> {
    tracing::info!("Discovering reporter directories...");
    let mut reporters =
        discoverer
            .list_reporters()
            .await
            .map_err(|e| LexFetchError::Discovery {
                details: format!("failed to list {}: {e}", discoverer.root_url()),
            })?;

    if reporters.is_empty() {
        tracing::warn!(url = %discoverer.root_url(), "No reporter directories found");
        return Ok(());
    }
    tracing::info!("Found {} reporter directories", reporters.len());

    if let Some(limit) = run.limit {
        reporters.truncate(limit);
        tracing::info!("Limiting to first {} reporters", limit);
    }

    let reporter_count = reporters.len();
    for (reporter_index, reporter) in reporters.iter().enumerate() {
        tracing::info!(
            "[{}/{}] Processing: {}",
            reporter_index + 1,
            reporter_count,
            reporter.name
        );

        let reporter_dir = run.output_dir.join(&reporter.name);
        tokio::fs::create_dir_all(&reporter_dir)
            .await
            .map_err(|e| LexFetchError::DirectoryCreation {
                path: reporter_dir.clone(),
                reason: e.to_string(),
            })?;

        let archives = match discoverer.list_archives(&reporter.url).await {
            Ok(archives) => archives,
            Err(e) => {
                tracing::warn!(reporter = %reporter.name, error = %e, "Failed to list reporter");
                continue;
            }
        };
        if archives.is_empty() {
            tracing::info!(reporter = %reporter.name, "No archive files found");
            continue;
        }
        tracing::info!("  Found {} archive file(s)", archives.len());

        let archive_count = archives.len();
        for (archive_index, archive_url) in archives.into_iter().enumerate() {
            let position = format!("[{}/{}]", archive_index + 1, archive_count);
            let locator = decoded_url_path(&archive_url).into_owned();
            let planned = match plan_item(archive_url, &locator, &reporter_dir) {
                Ok(planned) => planned,
                Err(e) => {
                    tracing::warn!("  {} {}", position, e);
                    summary.failed += 1;
                    continue;
                }
            };

            if planned.action == PlanAction::Skip {
                tracing::info!("  {} Skipping {} (already exists)", position, planned.file_name);
                summary.skipped += 1;
                continue;
            }

            tracing::info!("  {} Downloading {}...", position, planned.file_name);
            let result = download_file(http, &planned.url, &planned.destination, progress).await;
            match &result {
                Ok(_) => tracing::info!("  Completed {}", planned.file_name),
                Err(e) => tracing::warn!("  Failed {}: {}", planned.file_name, e),
            }
            summary.record(&result);

            if !run.request_delay.is_zero() {
                tokio::time::sleep(run.request_delay).await;
            }
        }
    }

    Ok(())
}
