// ABOUTME: Google Custom Search image backend for artwork lookups.
// ABOUTME: Asks for a single image result and returns its link.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::ImageLookup;
use crate::error::ImageError;

pub const GOOGLE_CSE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: Option<String>,
}

/// Image lookup via the Google Custom Search JSON API.
pub struct GoogleImageSearch {
    http: reqwest::Client,
    api_key: String,
    cse_id: String,
    endpoint: String,
}

impl GoogleImageSearch {
    pub fn new(api_key: impl Into<String>, cse_id: impl Into<String>) -> Result<Self, ImageError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            cse_id: cse_id.into(),
            endpoint: GOOGLE_CSE_ENDPOINT.to_string(),
        })
    }

    /// Point at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn query(title: &str, artist: &str) -> String {
        format!("{} {} artwork painting", title.trim(), artist.trim())
    }

    fn first_link(body: SearchResponse) -> Option<String> {
        body.items
            .into_iter()
            .next()
            .and_then(|item| item.link)
            .filter(|link| !link.is_empty())
    }
}

#[async_trait]
impl ImageLookup for GoogleImageSearch {
    async fn find_image(&self, title: &str, artist: &str) -> Result<Option<String>, ImageError> {
        let q = Self::query(title, artist);
        tracing::debug!(query = %q, "searching for artwork image");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", q.as_str()),
                ("searchType", "image"),
                ("num", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Status(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(Self::first_link(body))
    }
}
