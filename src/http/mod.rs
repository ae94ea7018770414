//! HTTP implementation of the fetch seam
//!
//! [`HttpFetcher`] is a ready-made [`PageFetcher`] for JSON page endpoints:
//! one GET per page with the merged parameters as the query string, non-2xx
//! statuses surfaced as errors, and the body decoded as a
//! [`PageResponse`]. Exactly one attempt per page — no retries, no backoff;
//! surfacing every failure to the triggering operation is the contract the
//! collections rely on.

use crate::error::{Error, Result};
use crate::page::{PageFetcher, PageRequest, PageResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;


const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches pages from one JSON endpoint
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    endpoint: Url,
    default_headers: HashMap<String, String>,
}

impl HttpFetcher {
    /// Create a fetcher for `endpoint` with default settings
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::builder(endpoint).build()
    }

    /// Create a configurable builder for `endpoint`
    pub fn builder(endpoint: &str) -> HttpFetcherBuilder {
        HttpFetcherBuilder {
            endpoint: endpoint.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: HashMap::new(),
            user_agent: format!("pagekit/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// The endpoint this fetcher queries
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Builder for [`HttpFetcher`]
pub struct HttpFetcherBuilder {
    endpoint: String,
    timeout: Duration,
    default_headers: HashMap<String, String>,
    user_agent: String,
}

impl HttpFetcherBuilder {
    /// Set the request timeout (default 30s)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header sent with every request
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the user agent string
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the fetcher
    pub fn build(self) -> Result<HttpFetcher> {
        let endpoint = Url::parse(&self.endpoint)?;
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()?;

        Ok(HttpFetcher {
            client,
            endpoint,
            default_headers: self.default_headers,
        })
    }
}

#[async_trait]
impl<R> PageFetcher<R> for HttpFetcher
where
    R: DeserializeOwned + Send,
{
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse<R>> {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.query_pairs() {
                pairs.append_pair(&key, &value);
            }
        }
        debug!(%url, "GET page");

        let mut req = self.client.get(url);
        for (key, value) in &self.default_headers {
            req = req.header(key, value);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "page request failed");
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response.text().await?;
        let page = serde_json::from_str(&body)?;
        Ok(page)
    }
}
