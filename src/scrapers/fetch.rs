//! Listing page transport.
//!
//! [`FetchPage`] is the seam between the pipeline and the network: the
//! production [`HttpFetcher`] performs one timed GET, while tests plug in
//! canned markup.

use crate::error::NewsError;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Fetch a page and return its markup.
///
/// Implementations must fail on transport errors and on non-2xx statuses;
/// there is no retry.
pub trait FetchPage {
    async fn fetch(&self, url: &Url) -> Result<String, NewsError>;
}

/// [`FetchPage`] backed by a `reqwest` client with a whole-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &Url) -> Result<String, NewsError> {
        info!("Downloading listing page");
        let response = self.client.get(url.clone()).send().await?.error_for_status()?;
        let status = response.status();
        let body = response.text().await?;
        info!(status = status.as_u16(), bytes = body.len(), "Fetched listing page");
        Ok(body)
    }
}
