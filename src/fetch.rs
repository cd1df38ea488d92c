//! Fetch-and-parse cycle: one HTTP GET plus status validation plus HTML
//! parsing, isolated from all extraction logic.
//!
//! Failure policy is decided by the caller, not here: a [`FetchError`] on a
//! primary listing page makes the controller skip that crawl unit, while the
//! same error on a per-member detail page only leaves the optional field
//! unset. Neither aborts a run.

use crate::config;
use scraper::Html;
use thiserror::Error;
use tracing::{debug, instrument};

/// Ways a single fetch-and-parse cycle can fail.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Network-level failure (DNS, connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The document parsed but is missing a region the page must have.
    #[error("page structure missing: {0}")]
    ParseFailure(&'static str),
}

/// HTTP client with the fixed User-Agent and timeout baked in.
///
/// Built once per run and shared by every fetch; requests are strictly
/// sequential, so there is no connection-pool tuning to do.
pub struct PageClient {
    http: reqwest::Client,
}

impl PageClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(config::USER_AGENT)
            .timeout(config::REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch `url` and parse the body into an HTML document.
    ///
    /// Returns [`FetchError::HttpStatus`] for any non-success status and
    /// [`FetchError::Transport`] for network failures. Parsing itself is
    /// tolerant; structural checks happen in the extractors.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_and_parse(&self, url: &str) -> Result<Html, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status));
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched page body");
        Ok(Html::parse_document(&body))
    }
}
