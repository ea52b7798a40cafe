use crate::config::HttpConfig;
use crate::error::LexFetchError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Shared client plus the per-request limits for listing calls.
///
/// Listings get a whole-request timeout. Transfers only get the client's idle
/// read timeout, so a large archive that keeps making progress is never cut off.
#[derive(Clone, Debug)]
pub struct HttpContext {
    client: Client,
    listing_timeout: Duration,
    chunk_size: usize,
}

impl HttpContext {
    pub fn new(http_config: &HttpConfig) -> Result<Self, LexFetchError> {
        let listing_timeout = Duration::from_secs(http_config.listing_timeout_secs);
        let client = Client::builder()
            .user_agent(http_config.user_agent.clone())
            .connect_timeout(listing_timeout)
            .read_timeout(Duration::from_secs(http_config.transfer_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            listing_timeout,
            chunk_size: http_config.chunk_size,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// GETs `url` as text, failing on transport errors and non-2xx statuses.
    pub async fn get_text(
        &self,
        url: &Url,
        query: &[(&str, &str)],
    ) -> Result<String, LexFetchError> {
        tracing::debug!(url = %url, ?query, "Fetching listing");

        let fetch_error = |source| LexFetchError::Fetch {
            url: url.to_string(),
            source,
        };

        let mut request = self.client.get(url.clone()).timeout(self.listing_timeout);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(fetch_error)?;

        response.text().await.map_err(fetch_error)
    }
}

pub fn parse_url(url: &str) -> Result<Url, LexFetchError> {
    Url::parse(url).map_err(|e| LexFetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
