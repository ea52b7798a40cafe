use crate::cli::TreeHostParams;
use crate::cli::interrupt::{RunState, run_until_interrupted};
use crate::discovery::TreeHostDiscoverer;
use crate::download::{ConsoleProgress, DownloadSummary, TransferProgress};
use crate::error::LexFetchError;
use crate::http::HttpContext;
use crate::pipeline::{TreeHostRun, mirror_tree_host};
use std::time::Duration;
use tracing;

pub async fn run_tree_host(params: TreeHostParams) -> Result<DownloadSummary, LexFetchError> {
    let TreeHostParams {
        app_config,
        base_url,
        output_dir,
        limit,
    } = params;

    tracing::info!("Mirroring {}", base_url);
    tracing::info!("Output directory: {}/", output_dir.display());

    let http = HttpContext::new(&app_config.http)?;
    let discoverer = TreeHostDiscoverer::new(
        http.clone(),
        base_url,
        app_config.tree_host.archive_extension.as_str(),
        app_config.tree_host.metadata_suffix.as_str(),
    );
    let run = TreeHostRun {
        output_dir,
        limit,
        request_delay: Duration::from_millis(app_config.tree_host.request_delay_ms),
    };

    let mut progress = ConsoleProgress::new();
    let mut summary = DownloadSummary::default();
    let state = run_until_interrupted(mirror_tree_host(
        &discoverer,
        &http,
        &run,
        &mut progress,
        &mut summary,
    ))
    .await?;

    match state {
        RunState::Interrupted => {
            progress.abandon();
            tracing::warn!("Download interrupted by user");
            tracing::info!("Downloaded so far: {}", summary.downloaded);
            tracing::info!(
                "You can resume by running the command again (existing files will be skipped)"
            );
        }
        RunState::Finished => {
            tracing::info!("Download complete!");
            tracing::info!("Processed {} archive file(s)", summary.total());
            tracing::info!("Downloaded: {}", summary.downloaded);
            tracing::info!("Skipped: {}", summary.skipped);
            tracing::info!("Failed: {}", summary.failed);
            tracing::info!("Output directory: {}/", run.output_dir.display());
        }
    }

    Ok(summary)
}
