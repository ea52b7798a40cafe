use crate::config::Config;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone)]
pub struct TreeHostParams {
    pub app_config: Config,
    pub base_url: Url,
    pub output_dir: PathBuf,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ObjectStoreParams {
    pub app_config: Config,
    pub output_dir: PathBuf,
    pub assume_yes: bool,
}
