//! Remote page fetching through a CORS relay.
//!
//! The archive pages are requested through a relay that takes the target URL,
//! percent-encoded, as a query value and forwards the response unchanged.
//!
//! # Architecture
//!
//! - [`PageFetcher`]: the capability the aggregator depends on
//! - [`ProxyFetcher`]: the `reqwest`-backed implementation used by the binary
//!
//! No retries happen here. Whether a failed page is fatal is decided by the
//! aggregator.

use crate::error::{Result, ScrapeError};
use std::fmt;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Fetch the raw document text of a page.
pub trait PageFetcher {
    /// Retrieve `url` and return its body.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Fetch`] when the response status is not 2xx, and
    /// [`ScrapeError::Network`] when the request never produced a response.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] that routes every request through a CORS relay.
pub struct ProxyFetcher {
    client: reqwest::Client,
    /// Relay prefix, e.g. `https://corsproxy.io/?`.
    proxy: String,
}

impl ProxyFetcher {
    pub fn new(proxy: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), proxy)
    }

    pub fn with_client(client: reqwest::Client, proxy: impl Into<String>) -> Self {
        Self {
            client,
            proxy: proxy.into(),
        }
    }

    /// The relay URL for `target`.
    pub fn proxied_url(&self, target: &str) -> String {
        format!("{}{}", self.proxy, urlencoding::encode(target))
    }
}

impl fmt::Debug for ProxyFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyFetcher")
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl PageFetcher for ProxyFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let t0 = Instant::now();
        let response = self.client.get(self.proxied_url(url)).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Relay returned non-success status"
            );
            return Err(ScrapeError::Fetch {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
