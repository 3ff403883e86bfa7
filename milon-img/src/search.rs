//! Image search provider boundary.

use crate::error::ImagingError;
use async_trait::async_trait;
use milon_core::config::ImageConfig;
use milon_core::model::ImageCandidate;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Narrow capability interface for candidate image search. The workflow
/// engine only ever sees this trait, so providers can be swapped freely.
#[async_trait]
pub trait ImageSearchProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Search for candidate illustrations. An unconfigured provider or an
    /// empty query yields an empty list, not an error.
    async fn search(&self, query: &str) -> Result<Vec<ImageCandidate>, ImagingError>;
}

/// Pixabay free vector search.
pub struct PixabaySearch {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    per_page: usize,
}

impl PixabaySearch {
    pub fn new(config: &ImageConfig) -> Result<Self, ImagingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.search_timeout_secs))
            .build()
            .map_err(|e| ImagingError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("PIXABAY_API_KEY").ok());

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string() + "/",
            api_key,
            per_page: config.result_count,
        })
    }
}

#[async_trait]
impl ImageSearchProvider for PixabaySearch {
    fn name(&self) -> &'static str {
        "pixabay"
    }

    async fn search(&self, query: &str) -> Result<Vec<ImageCandidate>, ImagingError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                warn!("PIXABAY_API_KEY not set, image search disabled");
                return Ok(Vec::new());
            }
        };

        let per_page = self.per_page.to_string();
        let params = [
            ("key", api_key.as_str()),
            ("q", query),
            ("per_page", per_page.as_str()),
            ("image_type", "vector"),
            ("safesearch", "true"),
            ("order", "popular"),
        ];

        debug!("Searching Pixabay for '{}'", query);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: String = text.chars().take(200).collect();
            return Err(ImagingError::Search(format!("HTTP {}: {}", status, body)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ImagingError::Search(format!("Malformed search response: {}", e)))?;

        let hits = json
            .get("hits")
            .and_then(|h| h.as_array())
            .ok_or_else(|| ImagingError::Search("Search response has no hits array".to_string()))?;

        let candidates: Vec<ImageCandidate> = hits
            .iter()
            .take(self.per_page)
            .map(|hit| ImageCandidate {
                id: hit
                    .get("id")
                    .map(|v| v.to_string().trim_matches('"').to_string())
                    .unwrap_or_default(),
                tags: hit
                    .get("tags")
                    .and_then(|t| t.as_str())
                    .unwrap_or_default()
                    .to_string(),
                thumbnail_url: hit
                    .get("previewURL")
                    .and_then(|u| u.as_str())
                    .map(String::from),
                full_image_url: hit
                    .get("largeImageURL")
                    .or_else(|| hit.get("imageURL"))
                    .and_then(|u| u.as_str())
                    .map(String::from),
                vector_url: hit
                    .get("vectorURL")
                    .and_then(|u| u.as_str())
                    .map(String::from),
                preview_bytes: None,
            })
            .collect();

        debug!("Pixabay returned {} candidates", candidates.len());
        Ok(candidates)
    }
}
