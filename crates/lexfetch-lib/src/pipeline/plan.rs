use crate::error::LexFetchError;
use crate::utils::final_path_segment;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanAction {
    /// The destination exists; its presence is the only completeness signal.
    Skip,
    Fetch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedItem {
    pub url: Url,
    pub file_name: String,
    pub destination: PathBuf,
    pub action: PlanAction,
}

/// Maps a remote locator to `<output_dir>/<final segment>` and decides whether to fetch it.
///
/// `locator` is the URL path or object key; any leading path components are discarded.
pub fn plan_item(url: Url, locator: &str, output_dir: &Path) -> Result<PlannedItem, LexFetchError> {
    let file_name = final_path_segment(locator);
    if file_name.is_empty() || file_name == "." || file_name == ".." {
        return Err(LexFetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("no file name in {locator:?}"),
        });
    }

    let destination = output_dir.join(file_name);
    let action = if destination.exists() {
        PlanAction::Skip
    } else {
        PlanAction::Fetch
    };

    Ok(PlannedItem {
        url,
        file_name: file_name.to_string(),
        destination,
        action,
    })
}
