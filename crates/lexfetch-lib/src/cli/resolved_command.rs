use crate::cli::args::Command;
use crate::cli::params::{ObjectStoreParams, TreeHostParams};
use crate::config::load_config;
use crate::error::LexFetchError;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    TreeHost(TreeHostParams),
    ObjectStore(ObjectStoreParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, LexFetchError> {
    match command {
        Command::TreeHost {
            config_path,
            output_dir,
            limit,
            base_url,
        } => {
            if limit == Some(0) {
                return Err(LexFetchError::CliArgumentValidation {
                    details: "limit must be greater than 0.".to_string(),
                });
            }

            let mut app_config = load_config(config_path.as_deref())?;

            if let Some(base_url) = base_url {
                app_config.tree_host.base_url = base_url;
            }
            let base_url = Url::parse(&app_config.tree_host.base_url).map_err(|e| {
                LexFetchError::CliArgumentValidation {
                    details: format!(
                        "base URL {} is not an absolute URL: {e}",
                        app_config.tree_host.base_url
                    ),
                }
            })?;

            let output_dir = output_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| app_config.tree_host.output_dir.clone());

            Ok(ResolvedCommand::TreeHost(TreeHostParams {
                app_config,
                base_url,
                output_dir,
                limit,
            }))
        }
        Command::ObjectStore {
            config_path,
            output_dir,
            assume_yes,
        } => {
            let app_config = load_config(config_path.as_deref())?;

            let output_dir = output_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| app_config.object_store.output_dir.clone());

            Ok(ResolvedCommand::ObjectStore(ObjectStoreParams {
                app_config,
                output_dir,
                assume_yes,
            }))
        }
    }
}
