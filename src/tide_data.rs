//! # Tide Timings Fetching
//!
//! This module handles the network side of the service: downloading the
//! published tide-timings page and handing its HTML to the extraction engine.
//!
//! ## Data Source
//!
//! - **URL**: configured by [`SourceConfig::url`], defaulting to the NEA
//!   tide-timings page
//! - **Format**: HTML, one table per month, with month labels in a tab bar
//! - **Identification**: every request carries the configured `User-Agent`
//!
//! ## Processing Pipeline
//! 1. **Fetch**: HTTP GET with the configured timeout
//! 2. **Check**: anything but `200 OK` is a failure
//! 3. **Decode**: UTF-8, with stray invalid bytes replaced; binary bodies fail
//! 4. **Extract**: [`crate::extract::extract_months`] over the parsed DOM
//!
//! Nothing is cached and nothing is retried; every call performs one fetch.
//!
//! ## Error Handling
//!
//! All failures propagate through [`TideError`]:
//! - **Transport**: connect errors, TLS failures and timeouts
//! - **Status**: non-200 responses
//! - **Document**: binary bodies (NUL bytes)
//! - **No data**: pages without a single usable month

use crate::config::SourceConfig;
use crate::document::HtmlPage;
use crate::extract::extract_months;
use crate::{TideError, TideMonth};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Anything that can produce the current tide timings.
///
/// The HTTP API depends on this trait rather than on [`TideService`] so it
/// can be exercised without network access.
#[async_trait]
pub trait TimingsSource: Send + Sync {
    async fn tide_timings(&self) -> Result<Vec<TideMonth>, TideError>;
}

/// Scrapes tide timings from the configured page.
#[derive(Clone, Debug)]
pub struct TideService {
    client: reqwest::Client,
    url: String,
}

impl TideService {
    /// Build a service with its own HTTP client.
    ///
    /// The client carries the configured `User-Agent` and whole-request
    /// timeout.
    pub fn new(source: &SourceConfig) -> Result<Self, TideError> {
        let client = reqwest::Client::builder()
            .user_agent(source.user_agent.as_str())
            .timeout(Duration::from_secs(source.timeout_secs))
            .build()?;

        Ok(Self::with_client(client, source.url.clone()))
    }

    /// Use an existing client, e.g. one shared with other services.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the page body as text.
    async fn fetch_page(&self) -> Result<String, TideError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TideError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!(url = %self.url, bytes = body.len(), "Fetched tide timings page");

        decode_page(&body)
    }
}

#[async_trait]
impl TimingsSource for TideService {
    async fn tide_timings(&self) -> Result<Vec<TideMonth>, TideError> {
        let html = self.fetch_page().await?;
        parse_page(&html)
    }
}

/// Interpret a response body as HTML text.
///
/// Stray invalid UTF-8 sequences become U+FFFD so one bad byte can't hide the
/// whole page. A body containing NUL bytes isn't text at all and is rejected.
pub fn decode_page(body: &[u8]) -> Result<String, TideError> {
    if body.contains(&0) {
        return Err(TideError::Document("body is binary, not HTML".to_string()));
    }
    Ok(String::from_utf8_lossy(body).into_owned())
}

/// Parse HTML and extract its months.
///
/// The DOM lives only for the duration of this call.
pub fn parse_page(html: &str) -> Result<Vec<TideMonth>, TideError> {
    let page = HtmlPage::parse(html);
    extract_months(&page.root())
}
