use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub http: HttpConfig,
    pub tree_host: TreeHostConfig,
    pub object_store: ObjectStoreConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct HttpConfig {
    /// Whole-request timeout applied to directory and bucket listings.
    pub listing_timeout_secs: u64,
    /// Idle read timeout applied while streaming archive bodies.
    pub transfer_timeout_secs: u64,
    /// Size of each write to the destination file.
    pub chunk_size: usize,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listing_timeout_secs: 30,
            transfer_timeout_secs: 300,
            chunk_size: DEFAULT_CHUNK_SIZE,
            user_agent: concat!("lexfetch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct TreeHostConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub archive_extension: String,
    /// Directory-looking links whose name ends with this suffix are metadata, not reporters.
    pub metadata_suffix: String,
    /// Pause after every transfer attempt.
    pub request_delay_ms: u64,
}

impl Default for TreeHostConfig {
    fn default() -> Self {
        Self {
            base_url: "https://static.case.law/".to_string(),
            output_dir: PathBuf::from("caselaw_downloads"),
            archive_extension: ".tar".to_string(),
            metadata_suffix: ".json".to_string(),
            request_delay_ms: 500,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ObjectStoreConfig {
    /// HTML page embedding the `BUCKET_NAME` variable.
    pub listing_page_url: String,
    /// Bucket API URL; `{bucket}` is replaced with the name found on the listing page.
    pub bucket_url_template: String,
    /// Queried with the alternate listing shapes, and the base that keys are downloaded from.
    pub bucket_base_url: String,
    pub storage_base_url: String,
    /// Documentation pointed to when automatic discovery fails.
    pub help_page_url: String,
    pub prefix: String,
    pub archive_extension: String,
    pub output_dir: PathBuf,
    /// Number of keys shown before the confirmation prompt.
    pub preview_count: usize,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            listing_page_url:
                "https://com-courtlistener-storage.s3-us-west-2.amazonaws.com/list.html?prefix=bulk-data/"
                    .to_string(),
            bucket_url_template: "https://{bucket}.s3-us-west-2.amazonaws.com/".to_string(),
            bucket_base_url: "https://com-courtlistener-storage.s3-us-west-2.amazonaws.com/"
                .to_string(),
            storage_base_url: "https://storage.courtlistener.com/bulk-data/".to_string(),
            help_page_url: "https://www.courtlistener.com/help/api/bulk-data/".to_string(),
            prefix: "bulk-data/".to_string(),
            archive_extension: ".bz2".to_string(),
            output_dir: PathBuf::from("courtlistener_downloads"),
            preview_count: 10,
        }
    }
}
