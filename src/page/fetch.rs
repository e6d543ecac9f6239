// src/page/fetch.rs
// =============================================================================
// This module downloads pages over HTTP.
//
// Key functionality:
// - GET request with a timeout and a redirect limit
// - Anything but a 2xx response is a failure
// - Failures that might go away on their own (timeouts, connection drops,
//   5xx, 429) are retried a few times with exponential backoff
// - Everything else (404, bad URL, ...) fails straight away
//
// A failed fetch only ends the branch of the search that asked for it.
// =============================================================================

use super::PageFetcher;
use crate::error::SearchError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

const DEFAULT_BACKOFF: Duration = Duration::from_millis(250);
const MAX_BACKOFF: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    retries: u32,
    backoff: Duration,
}

// Why a single attempt failed, and whether trying again could help
#[derive(Debug)]
struct Failure {
    reason: String,
    retryable: bool,
}

impl HttpFetcher {
    // Creates a fetcher
    //
    // Parameters:
    //   timeout: how long a single request may take
    //   retries: extra attempts after a retryable failure (0 = no retry)
    pub fn new(timeout: Duration, retries: u32) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("link-trail/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(HttpFetcher {
            client,
            retries,
            backoff: DEFAULT_BACKOFF,
        })
    }

    /// Base delay before the first retry; doubles on every further retry
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    // Delay before retry number `attempt + 1`: backoff, 2x backoff, 4x ...
    // capped at MAX_BACKOFF
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(MAX_BACKOFF)
    }

    async fn fetch_once(&self, url: &str) -> Result<String, Failure> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Failure {
                reason: format!("HTTP {}", status.as_u16()),
                retryable: status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS,
            });
        }

        response.text().await.map_err(|e| Failure {
            reason: format!("failed to read body: {}", e),
            retryable: true,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, SearchError> {
        let mut attempt = 0;

        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(failure) if failure.retryable && attempt < self.retries => {
                    let delay = self.backoff_delay(attempt);
                    attempt += 1;
                    debug!(url, attempt, reason = %failure.reason, "retrying fetch in {:?}", delay);
                    tokio::time::sleep(delay).await;
                }
                Err(failure) => {
                    return Err(SearchError::Fetch {
                        url: url.to_string(),
                        reason: failure.reason,
                    })
                }
            }
        }
    }
}

// Sorts reqwest errors into "worth retrying" and "not worth retrying"
fn categorize_error(error: reqwest::Error) -> Failure {
    if error.is_builder() {
        Failure {
            reason: format!("malformed URL: {}", error),
            retryable: false,
        }
    } else if error.is_redirect() {
        Failure {
            reason: "too many redirects".to_string(),
            retryable: false,
        }
    } else if error.is_timeout() {
        Failure {
            reason: "request timed out".to_string(),
            retryable: true,
        }
    } else if error.is_connect() {
        Failure {
            reason: format!("connection failed: {}", error),
            retryable: true,
        }
    } else {
        Failure {
            reason: error.to_string(),
            retryable: true,
        }
    }
}
