use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use widgets_common::config::GotifyConfig;
use widgets_common::types::AggregateCounts;

use crate::error::GotifyError;
use crate::models::{Endpoint, MessagePage, UpstreamRecord};

/// Header carrying the access key on every request (`X-Gotify-Key`).
pub const KEY_HEADER: &str = "x-gotify-key";

/// Largest page the server will return for `/message`.
pub const MESSAGE_PAGE_LIMIT: u32 = 200;

/// Client that reduces Gotify listings to counts.
///
/// Holds only immutable configuration and a pooled `reqwest::Client`, so one
/// instance can be cloned and used from concurrent tasks.
#[derive(Clone)]
pub struct GotifyClient {
    http: reqwest::Client,
    base_url: Url,
    max_pages: Option<u64>,
}

impl std::fmt::Debug for GotifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GotifyClient")
            .field("base_url", &self.base_url.as_str())
            .field("key", &"***")
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

impl GotifyClient {
    /// Build a client from the given configuration.
    ///
    /// Fails with `RequestConstruction` when the base URL cannot be parsed or
    /// the key is not a valid header value.
    pub fn new(config: &GotifyConfig) -> Result<Self, GotifyError> {
        let base_url = Url::parse(&config.url).map_err(|e| GotifyError::RequestConstruction {
            endpoint: Endpoint::Application,
            reason: format!("invalid base URL {:?}: {}", config.url, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GotifyError::RequestConstruction {
                endpoint: Endpoint::Application,
                reason: format!("base URL {:?} cannot have path segments", config.url),
            });
        }

        let mut key = HeaderValue::from_str(&config.key).map_err(|e| {
            GotifyError::RequestConstruction {
                endpoint: Endpoint::Application,
                reason: format!("invalid access key: {}", e),
            }
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(KEY_HEADER), key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GotifyError::RequestConstruction {
                endpoint: Endpoint::Application,
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url,
            max_pages: config.max_pages,
        })
    }

    /// Number of applications registered on the server.
    pub async fn count_applications(&self) -> Result<u64, GotifyError> {
        self.count_records(Endpoint::Application).await
    }

    /// Number of clients registered on the server.
    pub async fn count_clients(&self) -> Result<u64, GotifyError> {
        self.count_records(Endpoint::Client).await
    }

    /// Total number of messages across all pages of `/message`.
    ///
    /// Requests pages of `MESSAGE_PAGE_LIMIT`, threading each page's `since`
    /// cursor into the next request until a page reports `since == 0`. Any
    /// failure discards the running total.
    pub async fn count_messages(&self) -> Result<u64, GotifyError> {
        let mut total: u64 = 0;
        let mut cursor: u64 = 0;
        let mut pages: u64 = 0;

        loop {
            if let Some(limit) = self.max_pages.filter(|&limit| pages >= limit) {
                tracing::warn!(limit, total, since = cursor, "Message page limit reached");
                return Err(GotifyError::PageLimitExceeded { limit });
            }

            let url = self.message_url(cursor)?;
            let page: MessagePage = self.fetch(Endpoint::Message, url).await?;
            pages += 1;
            total = total.checked_add(page.paging.size).ok_or_else(|| {
                tracing::warn!(total, size = page.paging.size, "Message count overflowed");
                GotifyError::CountOverflow {
                    endpoint: Endpoint::Message,
                    total,
                    size: page.paging.size,
                }
            })?;

            tracing::debug!(
                page = pages,
                since = cursor,
                size = page.paging.size,
                next = page.paging.since,
                total,
                "Fetched message page"
            );

            if page.paging.is_last() {
                break;
            }
            cursor = page.paging.since;
        }

        tracing::debug!(pages, total, "Counted messages");
        Ok(total)
    }

    /// All three counts, fetched concurrently. Fails if any count fails.
    pub async fn aggregate(&self) -> Result<AggregateCounts, GotifyError> {
        let (applications, clients, messages) = tokio::try_join!(
            self.count_applications(),
            self.count_clients(),
            self.count_messages(),
        )?;

        Ok(AggregateCounts {
            applications,
            clients,
            messages,
        })
    }

    /// Decode the full listing, then report its length.
    async fn count_records(&self, endpoint: Endpoint) -> Result<u64, GotifyError> {
        let url = self.endpoint_url(endpoint)?;
        // A `null` listing counts as empty.
        let records: Option<Vec<UpstreamRecord>> = self.fetch(endpoint, url).await?;
        let count = records.map_or(0, |r| r.len() as u64);

        tracing::debug!(endpoint = %endpoint, count, "Counted records");
        Ok(count)
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, GotifyError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GotifyError::RequestConstruction {
                endpoint,
                reason: format!("base URL {} cannot have path segments", self.base_url),
            })?
            .pop_if_empty()
            .push(endpoint.path());
        Ok(url)
    }

    fn message_url(&self, since: u64) -> Result<Url, GotifyError> {
        let mut url = self.endpoint_url(Endpoint::Message)?;
        url.query_pairs_mut()
            .append_pair("limit", &MESSAGE_PAGE_LIMIT.to_string())
            .append_pair("since", &since.to_string());
        Ok(url)
    }

    /// GET `url`, require a 200, and decode the body as `T`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        url: Url,
    ) -> Result<T, GotifyError> {
        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::warn!(endpoint = %endpoint, error = %e, "Request to Gotify failed");
            GotifyError::from_reqwest(endpoint, e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(endpoint = %endpoint, status = %status, "Gotify returned non-OK status");
            return Err(GotifyError::UpstreamStatus { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| GotifyError::from_reqwest(endpoint, e))?;

        serde_json::from_slice(&body).map_err(|source| {
            tracing::warn!(endpoint = %endpoint, error = %source, "Malformed Gotify response");
            GotifyError::Decode { endpoint, source }
        })
    }
}
