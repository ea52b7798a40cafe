use super::types::{DiscoveredKeys, DiscoveryStrategy};
use crate::config::ObjectStoreConfig;
use crate::error::LexFetchError;
use crate::http::{HttpContext, parse_url};
use crate::utils::compile_static_regex;
use itertools::Itertools;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static KEY_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"<Key>([^<]+)</Key>"));
static BUCKET_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r#"BUCKET_NAME\s*=\s*['"]([^'"]+)['"]"#));

/// Scrapes `<Key>` elements from a bucket listing body, keeping those with the wanted extension.
pub fn extract_keys(body: &str, archive_extension: &str) -> Vec<String> {
    KEY_RE
        .captures_iter(body)
        .map(|captures| captures[1].to_string())
        .filter(|key| key.ends_with(archive_extension))
        .collect_vec()
}

pub fn find_bucket_name(html: &str) -> Option<&str> {
    BUCKET_NAME_RE
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// The listing query shapes tried against the bucket base, in order.
pub fn alternate_endpoints(base_url: &Url, prefix: &str) -> Vec<Url> {
    let shapes: [&[(&str, &str)]; 3] = [
        &[("list-type", "2"), ("prefix", prefix)],
        &[("prefix", prefix)],
        &[("delimiter", "/"), ("prefix", prefix)],
    ];

    shapes
        .iter()
        .map(|pairs| {
            let mut endpoint = base_url.clone();
            endpoint.query_pairs_mut().clear().extend_pairs(pairs.iter());
            endpoint
        })
        .collect_vec()
}

#[derive(Clone, Debug)]
pub struct ObjectStoreDiscoverer {
    http: HttpContext,
    listing_page_url: Url,
    bucket_url_template: String,
    bucket_base_url: Url,
    storage_base_url: Url,
    help_page_url: String,
    prefix: String,
    archive_extension: String,
}

impl ObjectStoreDiscoverer {
    pub fn from_config(
        http: HttpContext,
        config: &ObjectStoreConfig,
    ) -> Result<Self, LexFetchError> {
        Ok(Self {
            http,
            listing_page_url: parse_url(&config.listing_page_url)?,
            bucket_url_template: config.bucket_url_template.clone(),
            bucket_base_url: parse_url(&config.bucket_base_url)?,
            storage_base_url: parse_url(&config.storage_base_url)?,
            help_page_url: config.help_page_url.clone(),
            prefix: config.prefix.clone(),
            archive_extension: config.archive_extension.clone(),
        })
    }

    /// Base URL that discovered keys are appended to for download.
    pub fn download_base_url(&self) -> &Url {
        &self.bucket_base_url
    }

    pub async fn list_bucket_keys(
        &self,
        endpoint: &Url,
        prefix: Option<&str>,
    ) -> Result<Vec<String>, LexFetchError> {
        let query = prefix.map(|p| vec![("prefix", p)]).unwrap_or_default();
        let body = self.http.get_text(endpoint, &query).await?;
        Ok(extract_keys(&body, &self.archive_extension))
    }

    async fn keys_from_listing_page(&self) -> Result<Vec<String>, LexFetchError> {
        tracing::info!(url = %self.listing_page_url, "Fetching HTML listing page");
        let html = self.http.get_text(&self.listing_page_url, &[]).await?;

        let Some(bucket_name) = find_bucket_name(&html) else {
            tracing::warn!("Could not extract bucket name from listing page");
            return Ok(Vec::new());
        };
        tracing::info!(bucket = bucket_name, "Found bucket");

        let bucket_url = parse_url(&self.bucket_url_template.replace("{bucket}", bucket_name))?;
        self.list_bucket_keys(&bucket_url, Some(&self.prefix)).await
    }

    async fn keys_from_alternate_endpoints(&self) -> Option<(usize, Vec<String>)> {
        tracing::info!("Trying alternate listing endpoints");
        for (index, endpoint) in alternate_endpoints(&self.bucket_base_url, &self.prefix)
            .iter()
            .enumerate()
        {
            tracing::info!(endpoint = %endpoint, "Trying endpoint");
            match self.list_bucket_keys(endpoint, None).await {
                Ok(keys) if !keys.is_empty() => {
                    tracing::info!(count = keys.len(), "Found files using this endpoint");
                    return Some((index, keys));
                }
                Ok(_) => tracing::debug!(endpoint = %endpoint, "No matching keys"),
                Err(e) => tracing::debug!(endpoint = %endpoint, error = %e, "Endpoint failed"),
            }
        }
        None
    }

    /// Runs the fallback chain; the first strategy yielding any keys wins and later ones are not queried.
    pub async fn discover(&self) -> Result<DiscoveredKeys, LexFetchError> {
        match self.keys_from_listing_page().await {
            Ok(keys) if !keys.is_empty() => {
                return Ok(DiscoveredKeys {
                    strategy: DiscoveryStrategy::ListingPage,
                    keys,
                });
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Listing page discovery failed"),
        }

        if let Some((index, keys)) = self.keys_from_alternate_endpoints().await {
            return Ok(DiscoveredKeys {
                strategy: DiscoveryStrategy::AlternateEndpoint(index),
                keys,
            });
        }

        tracing::info!(url = %self.storage_base_url, "Trying storage base endpoint");
        match self
            .list_bucket_keys(&self.storage_base_url, Some(&self.prefix))
            .await
        {
            Ok(keys) if !keys.is_empty() => Ok(DiscoveredKeys {
                strategy: DiscoveryStrategy::StorageBase,
                keys,
            }),
            Ok(_) => Err(LexFetchError::Discovery {
                details: format!(
                    "no {} files found by any listing strategy",
                    self.archive_extension
                ),
            }),
            Err(e) => Err(LexFetchError::Discovery {
                details: format!("all listing strategies failed, last error: {e}"),
            }),
        }
    }

    pub fn remediation(&self, output_dir: &std::path::Path) -> String {
        let bucket_path = self.bucket_base_url.host_str().map(|host| {
            let bucket = host.split('.').next().unwrap_or(host);
            format!("s3://{bucket}/{}", self.prefix)
        });

        let mut lines = vec![
            "This may be due to:".to_string(),
            "  1. Network restrictions or a proxy blocking bucket access".to_string(),
            "  2. Changes in the bucket configuration".to_string(),
            "  3. The bucket requiring authentication".to_string(),
            "Alternative ways to download:".to_string(),
        ];
        if let Some(bucket_path) = bucket_path {
            lines.push(format!(
                "  - Use the AWS CLI: aws s3 sync {bucket_path} ./{}/ --no-sign-request",
                output_dir.display()
            ));
        }
        lines.push(format!(
            "  - Visit the bulk data help page: {}",
            self.help_page_url
        ));
        lines.push(format!(
            "  - Check whether the files are listed at: {}",
            self.storage_base_url
        ));
        lines.join("\n")
    }
}
