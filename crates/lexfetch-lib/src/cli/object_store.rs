use crate::cli::ObjectStoreParams;
use crate::cli::interrupt::{RunState, run_until_interrupted};
use crate::discovery::ObjectStoreDiscoverer;
use crate::download::{ConsoleProgress, DownloadSummary, TransferProgress};
use crate::error::LexFetchError;
use crate::http::HttpContext;
use crate::pipeline::{ObjectStoreOutcome, ask_confirmation, mirror_object_keys};
use eyre::WrapErr;
use tracing;

pub async fn run_object_store(
    params: ObjectStoreParams,
) -> Result<ObjectStoreOutcome, LexFetchError> {
    let ObjectStoreParams {
        app_config,
        output_dir,
        assume_yes,
    } = params;
    let store_config = &app_config.object_store;

    tokio::fs::create_dir_all(&output_dir)
        .await
        .map_err(|e| LexFetchError::DirectoryCreation {
            path: output_dir.clone(),
            reason: e.to_string(),
        })?;
    tracing::info!("Files will be saved to: {}/", output_dir.display());

    let http = HttpContext::new(&app_config.http)?;
    let discoverer = ObjectStoreDiscoverer::from_config(http.clone(), store_config)?;

    let discovered = match discoverer.discover().await {
        Ok(discovered) => discovered,
        Err(e) => {
            tracing::error!("Could not discover files automatically: {}", e);
            tracing::error!("{}", discoverer.remediation(&output_dir));
            return Err(e);
        }
    };
    tracing::info!(
        strategy = %discovered.strategy,
        "Found {} {} files",
        discovered.keys.len(),
        store_config.archive_extension
    );

    if !assume_yes {
        let keys = discovered.keys.clone();
        let preview_count = store_config.preview_count;
        let confirmed = tokio::task::spawn_blocking(move || {
            ask_confirmation(
                std::io::stdin().lock(),
                std::io::stdout(),
                &keys,
                preview_count,
            )
        })
        .await
        .wrap_err("Confirmation prompt panicked")??;

        if !confirmed {
            tracing::info!("Download cancelled.");
            return Ok(ObjectStoreOutcome::Cancelled);
        }
    }

    let mut progress = ConsoleProgress::new();
    let mut summary = DownloadSummary::default();
    let state = run_until_interrupted(async {
        mirror_object_keys(
            &http,
            &discovered.keys,
            discoverer.download_base_url(),
            &output_dir,
            &mut progress,
            &mut summary,
        )
        .await;
        Ok(())
    })
    .await?;

    if state == RunState::Interrupted {
        progress.abandon();
        tracing::warn!("Download interrupted by user");
        tracing::info!("Successful so far: {}", summary.successful());
        tracing::info!(
            "You can resume by running the command again (existing files will be skipped)"
        );
        return Ok(ObjectStoreOutcome::Interrupted(summary));
    }

    tracing::info!("Download complete!");
    tracing::debug!(%summary, total = summary.total(), "Object-store run finished");
    tracing::info!("Successful: {}", summary.successful());
    tracing::info!("Failed: {}", summary.failed);
    tracing::info!("Output directory: {}/", output_dir.display());

    Ok(ObjectStoreOutcome::Completed(summary))
}
