//! # Hotel Directory Client
//!
//! Read-only access to the hotels backend. Two endpoints, no auth, no bodies:
//!
//! ```text
//! GET {base}/hotels/api/cities/        → [{code, name}, ...]
//! GET {base}/hotels/api/hotels/{code}  → [{code, name, city}, ...]
//! ```
//!
//! The event loop only sees the `HotelDirectory` trait, so tests can swap in
//! a canned directory or point `HttpDirectory` at a mock server.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::types::{City, Hotel};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const API_PREFIX: [&str; 2] = ["hotels", "api"];

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Base URL is unusable.
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// Backend answered with a non-success status.
    Api { status: u16, message: String },
    /// Body was not the JSON array we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[async_trait]
pub trait HotelDirectory: Send + Sync {
    /// Fetches every city, in the order the backend returns them.
    async fn fetch_cities(&self) -> Result<Vec<City>, ApiError>;

    /// Fetches the hotels of one city, keyed by city code.
    async fn fetch_hotels(&self, city_code: &str) -> Result<Vec<Hotel>, ApiError>;
}

/// `HotelDirectory` backed by the real HTTP API.
pub struct HttpDirectory {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDirectory {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base}/hotels/api/{segments...}`. Segments are percent-encoded,
    /// so a city code can never escape its path slot.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {:?}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("base URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, ApiError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend error: {} - {}", status.as_u16(), message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl HotelDirectory for HttpDirectory {
    async fn fetch_cities(&self) -> Result<Vec<City>, ApiError> {
        // Trailing empty segment keeps the backend's `cities/` slash.
        let url = self.endpoint(&["cities", ""])?;
        let cities: Vec<City> = self.get_list(url).await?;
        info!("Fetched {} cities", cities.len());
        Ok(cities)
    }

    async fn fetch_hotels(&self, city_code: &str) -> Result<Vec<Hotel>, ApiError> {
        let url = self.endpoint(&["hotels", city_code])?;
        let hotels: Vec<Hotel> = self.get_list(url).await?;
        info!("Fetched {} hotels for city {}", hotels.len(), city_code);
        Ok(hotels)
    }
}
