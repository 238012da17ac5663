//! Shared cache tier over HTTP
//!
//! Thin client for a shared cache service keyed by the request hash.
//! Entries are stored as JSON with a TTL the server enforces; expiry is
//! therefore server-side, unlike the local tier's lazy expiry.

use async_trait::async_trait;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::errors::{Result, RetrievalError};
use crate::types::RetrievalResult;

/// Default request timeout against the shared cache service
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// HTTP-backed shared cache tier
pub struct HttpCache {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCache {
    /// Create a client for the shared cache at `base_url` with the default
    /// request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout. The timeout is short
    /// by design: a slow cache is worse than a miss.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn entry_url(&self, key: &str) -> String {
        format!("{}/cache/{}", self.base_url, key)
    }
}

#[async_trait]
impl CacheStore for HttpCache {
    async fn get(&self, key: &str) -> Result<Option<RetrievalResult>> {
        let response = self
            .client
            .get(self.entry_url(key))
            .send()
            .await
            .map_err(|e| RetrievalError::CacheUnavailable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(RetrievalError::CacheUnavailable(format!(
                "shared cache returned {}",
                response.status()
            )));
        }

        let value = response
            .json::<RetrievalResult>()
            .await
            .map_err(|e| RetrievalError::CacheUnavailable(e.to_string()))?;

        Ok(Some(value))
    }

    async fn put(&self, key: &str, value: &RetrievalResult, ttl: Duration) -> Result<()> {
        let response = self
            .client
            .put(self.entry_url(key))
            .query(&[("ttl_secs", ttl.as_secs())])
            .json(value)
            .send()
            .await
            .map_err(|e| RetrievalError::CacheUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RetrievalError::CacheUnavailable(format!(
                "shared cache write returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
