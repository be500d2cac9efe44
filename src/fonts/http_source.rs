//! HTTP font transport.
//!
//! Fonts are usually deployed next to the web front end that prints the
//! receipts, so the assets are fetched from the same origin. A non-success
//! status becomes [`Error::FontFetch`] carrying the status code, and the
//! response's `Content-Type` is handed to validation as the declared type.

use super::loader::{FetchedAsset, FontSource};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches font assets over HTTP(S) relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpFontSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFontSource {
    /// Serve assets relative to `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use an existing client, e.g. one shared with the rest of the application.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base URL assets are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `asset`. Absolute asset URLs are used unchanged.
    pub fn url_for(&self, asset: &str) -> String {
        if asset.starts_with("http://") || asset.starts_with("https://") {
            return asset.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            asset.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl FontSource for HttpFontSource {
    async fn fetch(&self, asset: &str) -> Result<FetchedAsset> {
        let url = self.url_for(asset);
        let fetch_error = |status: Option<u16>, reason: String| Error::FontFetch {
            asset: asset.to_string(),
            status,
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_error(e.status().map(|s| s.as_u16()), format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(
                Some(status.as_u16()),
                format!("{} returned {}", url, status),
            ));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let data = response
            .bytes()
            .await
            .map_err(|e| fetch_error(Some(status.as_u16()), format!("failed to read body: {}", e)))?;

        log::debug!("Fetched {} ({} bytes, {:?})", url, data.len(), content_type);
        Ok(FetchedAsset { data, content_type })
    }
}
