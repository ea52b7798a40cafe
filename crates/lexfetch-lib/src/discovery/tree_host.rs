use super::types::Reporter;
use crate::error::LexFetchError;
use crate::http::HttpContext;
use crate::utils::{compile_static_selector, last_non_empty_segment};
use itertools::Itertools;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("a[href]"));

/// Extracts every anchor `href` from `html`, resolved against `page_url`, in document order.
///
/// Anchors inside comments, and `href`-looking text in other attributes, are not links.
pub fn extract_anchor_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            match page_url.join(href) {
                Ok(link) => Some(link),
                Err(e) => {
                    tracing::debug!(href = %href, error = %e, "Skipping unresolvable link");
                    None
                }
            }
        })
        .collect_vec()
}

/// Keeps directory links other than the root, skipping metadata entries.
pub fn filter_reporters(links: &[Url], root_url: &Url, metadata_suffix: &str) -> Vec<Reporter> {
    links
        .iter()
        .filter(|link| link.as_str().ends_with('/') && *link != root_url)
        .filter_map(|link| {
            let name = last_non_empty_segment(link.path())?;
            if name.ends_with(metadata_suffix) {
                return None;
            }
            Some(Reporter {
                name: name.to_string(),
                url: link.clone(),
            })
        })
        .collect_vec()
}

pub fn filter_archives(links: Vec<Url>, archive_extension: &str) -> Vec<Url> {
    links
        .into_iter()
        .filter(|link| link.as_str().ends_with(archive_extension))
        .collect_vec()
}

/// Reads a static file-tree host: root listing -> reporter directories -> archives.
#[derive(Clone, Debug)]
pub struct TreeHostDiscoverer {
    http: HttpContext,
    root_url: Url,
    archive_extension: String,
    metadata_suffix: String,
}

impl TreeHostDiscoverer {
    pub fn new(
        http: HttpContext,
        root_url: Url,
        archive_extension: impl Into<String>,
        metadata_suffix: impl Into<String>,
    ) -> Self {
        Self {
            http,
            root_url,
            archive_extension: archive_extension.into(),
            metadata_suffix: metadata_suffix.into(),
        }
    }

    pub fn root_url(&self) -> &Url {
        &self.root_url
    }

    pub async fn list_directory(&self, url: &Url) -> Result<Vec<Url>, LexFetchError> {
        let html = self.http.get_text(url, &[]).await?;
        let links = extract_anchor_links(&html, url);
        tracing::trace!(url = %url, count = links.len(), "Listed directory");
        Ok(links)
    }

    pub async fn list_reporters(&self) -> Result<Vec<Reporter>, LexFetchError> {
        let links = self.list_directory(&self.root_url).await?;
        Ok(filter_reporters(
            &links,
            &self.root_url,
            &self.metadata_suffix,
        ))
    }

    /// Archives directly inside `reporter_url`; nested subdirectories are not followed.
    pub async fn list_archives(&self, reporter_url: &Url) -> Result<Vec<Url>, LexFetchError> {
        let links = self.list_directory(reporter_url).await?;
        Ok(filter_archives(links, &self.archive_extension))
    }
}
