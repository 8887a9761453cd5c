//! HTTP redirect expansion

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header::LOCATION, redirect::Policy};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum UnshortenError {
    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("No redirect (HTTP {0})")]
    NoRedirect(u16),
}

pub type Result<T> = std::result::Result<T, UnshortenError>;

impl From<reqwest::Error> for UnshortenError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UnshortenError::Timeout
        } else {
            UnshortenError::Request(e.to_string())
        }
    }
}

/// Resolves a possibly shortened URL to its destination.
///
/// Implementations never fail: when nothing can be resolved they return
/// the input unchanged.
#[async_trait]
pub trait Expander: Send + Sync {
    async fn expand(&self, url: &str, user_agent: &str) -> String;
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bound on each HEAD/GET attempt
    pub request_timeout: Duration,
    /// Redirect limit for the GET fallback
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            max_redirects: 10,
        }
    }
}

/// HEAD-then-GET expander backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpExpander {
    head_client: Client,
    get_client: Client,
}

impl HttpExpander {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let head_client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| UnshortenError::Request(e.to_string()))?;

        let get_client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| UnshortenError::Request(e.to_string()))?;

        Ok(Self {
            head_client,
            get_client,
        })
    }

    /// Single HEAD request; succeeds only on a redirect with a `Location`
    async fn head_location(&self, url: &Url, user_agent: &str) -> Result<Url> {
        let response = self
            .head_client
            .head(url.clone())
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        if !is_redirect(status) {
            return Err(UnshortenError::NoRedirect(status.as_u16()));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(UnshortenError::NoRedirect(status.as_u16()))?;

        // Location may be relative to the request URL
        url.join(location)
            .map_err(|e| UnshortenError::InvalidUrl(format!("{location}: {e}")))
    }

    /// GET with redirect following; returns the final request URL
    async fn get_final_url(&self, url: &Url, user_agent: &str) -> Result<Url> {
        let response = self
            .get_client
            .get(url.clone())
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?;

        Ok(response.url().clone())
    }
}

#[async_trait]
impl Expander for HttpExpander {
    async fn expand(&self, url: &str, user_agent: &str) -> String {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(url, error = %e, "Cannot expand unparsable URL");
                return url.to_string();
            }
        };

        let resolved = match self.head_location(&parsed, user_agent).await {
            Ok(location) => {
                debug!(url, %location, "HEAD redirect resolved");
                location
            }
            Err(e) => {
                debug!(url, error = %e, "HEAD gave no redirect, falling back to GET");
                match self.get_final_url(&parsed, user_agent).await {
                    Ok(final_url) => {
                        debug!(url, %final_url, "GET resolved");
                        final_url
                    }
                    Err(e) => {
                        warn!(url, error = %e, "Expansion failed, keeping original URL");
                        return url.to_string();
                    }
                }
            }
        };

        // No hop: keep the caller's spelling rather than the normalized form
        if resolved == parsed {
            return url.to_string();
        }
        resolved.to_string()
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}
