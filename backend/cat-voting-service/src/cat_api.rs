//! Client for the external image search API (The Cat API)
//!
//! One GET per registration. A non-200 answer or a failed request means
//! "no image" and is returned as `Ok(None)`. A 200 answer whose body does
//! not decode is a `CatApiError::Parse`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::CatApiConfig;
use crate::metrics::CAT_API_REQUEST_DURATION_SECONDS;
use crate::models::CatImage;

#[derive(Debug, Error)]
pub enum CatApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Malformed image search response: {0}")]
    Parse(String),
}

/// Source of cat images for registration
#[async_trait]
pub trait CatImageProvider: Send + Sync {
    /// Fetch one image; `Ok(None)` when the provider is unavailable
    async fn fetch_cat(&self) -> Result<Option<CatImage>, CatApiError>;
}

/// One element of the search response; other fields are ignored
#[derive(Debug, Deserialize)]
struct ImageSearchResult {
    id: String,
    url: String,
}

/// Decode the search response and keep the first element
fn decode_first(body: &[u8]) -> Result<CatImage, CatApiError> {
    let results: Vec<ImageSearchResult> =
        serde_json::from_slice(body).map_err(|e| CatApiError::Parse(e.to_string()))?;

    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| CatApiError::Parse("empty result array".to_string()))?;

    Ok(CatImage {
        id: first.id,
        url: first.url,
    })
}

/// reqwest-backed `CatImageProvider`
pub struct TheCatApiClient {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl TheCatApiClient {
    pub fn new(config: &CatApiConfig) -> Result<Self, CatApiError> {
        let client = Client::builder()
            .user_agent(concat!("cat-voting-service/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn observe(outcome: &str, start: Instant) {
        CAT_API_REQUEST_DURATION_SECONDS
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());
    }
}

#[async_trait]
impl CatImageProvider for TheCatApiClient {
    async fn fetch_cat(&self) -> Result<Option<CatImage>, CatApiError> {
        let start = Instant::now();

        let mut request = self.client.get(&self.url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, url = %self.url, "Image provider request failed");
                Self::observe("unavailable", start);
                return Ok(None);
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                status = status.as_u16(),
                url = %self.url,
                "Image provider returned non-200 status"
            );
            Self::observe("unavailable", start);
            return Ok(None);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to read image provider response body");
                Self::observe("unavailable", start);
                return Ok(None);
            }
        };

        match decode_first(&body) {
            Ok(image) if image.id.is_empty() || image.url.is_empty() => {
                warn!("Image provider returned an empty id or url");
                Self::observe("unavailable", start);
                Ok(None)
            }
            Ok(image) => {
                debug!(cat_id = %image.id, "Fetched cat image");
                Self::observe("ok", start);
                Ok(Some(image))
            }
            Err(e) => {
                warn!(error = %e, "Image provider response could not be decoded");
                Self::observe("invalid", start);
                Err(e)
            }
        }
    }
}
