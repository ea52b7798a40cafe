use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexFetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {details}")]
    ConfigValidation { details: String },

    #[error("Invalid command-line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to fetch listing {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to download {url} to {path}: {reason}")]
    Transfer {
        url: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Output directory creation failed at {path}: {reason}")]
    DirectoryCreation { path: PathBuf, reason: String },

    #[error("Could not discover files: {details}")]
    Discovery { details: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}

impl LexFetchError {
    pub(crate) fn transfer(
        url: impl Into<String>,
        path: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        Self::Transfer {
            url: url.into(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
