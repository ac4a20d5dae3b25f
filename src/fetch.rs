//! Story fetching.
//!
//! [`StorySource`] is the seam between the views and the network. The
//! production implementation, [`HnClient`], issues a single `GET` against the
//! configured search endpoint and decodes the `hits` array in the order the
//! server sent it.
//!
//! ```text
//!  GET {endpoint}?tags=front_page&hitsPerPage=100
//!        │
//!        ▼
//!  2xx ──▶ decode hits ──▶ Ok(Vec<Story>)
//!  else ─────────────────▶ Err(FetchError)
//! ```
//!
//! There is no retry and, unless `api.timeout_secs` is set, no timeout.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::models::{SearchResponse, Story};

/// Message carried by a [`FetchError`] when the server answers with a
/// non-success status.
pub const NOT_OK_MESSAGE: &str = "Network response was not ok";

/// The one failure a fetch can produce. Transport errors, bad statuses and
/// undecodable bodies are not distinguished beyond their message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Anything that can produce the current front page.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use hn_front::fetch::{FetchError, StorySource};
/// use hn_front::models::Story;
///
/// struct Empty;
///
/// #[async_trait]
/// impl StorySource for Empty {
///     fn describe(&self) -> String {
///         "empty".to_string()
///     }
///
///     async fn fetch(&self) -> Result<Vec<Story>, FetchError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait StorySource: Send + Sync {
    /// Short label for logs and progress lines (usually the request URL).
    fn describe(&self) -> String;

    /// Fetch the stories, preserving source order.
    async fn fetch(&self) -> Result<Vec<Story>, FetchError>;
}

/// HTTP client for the Algolia Hacker News search API.
pub struct HnClient {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl HnClient {
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            url: request_url(api)?,
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

/// Build the full request URL from `[api]` settings.
pub fn request_url(api: &ApiConfig) -> Result<reqwest::Url> {
    let url = reqwest::Url::parse_with_params(
        &api.endpoint,
        &[
            ("tags", api.tags.clone()),
            ("hitsPerPage", api.hits_per_page.to_string()),
        ],
    )?;
    Ok(url)
}

#[async_trait]
impl StorySource for HnClient {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<Story>, FetchError> {
        debug!(url = %self.url, "fetching front page");

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "front page request failed");
                FetchError::new(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "front page request returned an error status");
            return Err(FetchError::new(NOT_OK_MESSAGE));
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "front page body could not be decoded");
            FetchError::new(format!("Invalid response body: {}", e))
        })?;

        info!(stories = body.hits.len(), "fetched front page");
        Ok(body.hits)
    }
}
