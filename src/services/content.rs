//! Content collaborator service implementation
//!
//! Fetches externally hosted page envelopes for dynamic-content slugs. The
//! slug map is configuration; a slug outside the map resolves to `None`
//! without raising an error, which lets navigation ignore unknown sections
//! silently.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::settings::Settings;
use crate::utils::errors::{ConciergeError, ContentError, Result};

/// Rendering envelope returned by the content collaborator; `body` is
/// markdown-lite text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalPageData {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub body: String,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub cta_text: Option<String>,
}

/// Content service for dynamic pages
#[derive(Debug, Clone)]
pub struct ContentService {
    client: Client,
    settings: Settings,
}

impl ContentService {
    /// Create a new ContentService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.content.timeout_seconds))
            .user_agent("SwitchConcierge/1.0")
            .build()
            .map_err(ConciergeError::Http)?;

        Ok(Self { client, settings })
    }

    /// Whether a slug maps to a configured source
    pub fn knows(&self, slug: &str) -> bool {
        self.settings.content.sources.contains_key(slug)
    }

    /// Fetch the page envelope for a slug; unknown slugs yield `Ok(None)`.
    pub async fn fetch(
        &self,
        slug: &str,
    ) -> std::result::Result<Option<ExternalPageData>, ContentError> {
        let Some(endpoint) = self.settings.content.sources.get(slug) else {
            debug!(slug = slug, "No content source for slug");
            return Ok(None);
        };

        debug!(slug = slug, endpoint = %endpoint, "Fetching external content");

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| ContentError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ContentError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let page: ExternalPageData = response
            .json()
            .await
            .map_err(|e| ContentError::InvalidEnvelope(e.to_string()))?;

        Ok(Some(page))
    }
}
