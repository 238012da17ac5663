//! Two-tier cache composition
//!
//! Reads try the primary (shared) tier and fall through to the fallback
//! (local) tier when the primary is unreachable. Writes go to both tiers;
//! a failed write in either tier is logged and swallowed. A cache miss is
//! always safe, so no cache failure ever propagates to the caller.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::cache::CacheStore;
use crate::errors::Result;
use crate::types::RetrievalResult;

/// Fallback decorator over two interchangeable `CacheStore` tiers
pub struct TieredCache {
    primary: Arc<dyn CacheStore>,
    fallback: Arc<dyn CacheStore>,
}

impl TieredCache {
    pub fn new(primary: Arc<dyn CacheStore>, fallback: Arc<dyn CacheStore>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl CacheStore for TieredCache {
    async fn get(&self, key: &str) -> Result<Option<RetrievalResult>> {
        match self.primary.get(key).await {
            Ok(hit) => Ok(hit),
            Err(err) => {
                warn!(error = %err, "primary cache tier unreachable, falling back");
                // The fallback tier answers the same contract; a miss here
                // is an ordinary miss for the caller
                match self.fallback.get(key).await {
                    Ok(hit) => Ok(hit),
                    Err(err) => {
                        warn!(error = %err, "fallback cache tier read failed");
                        Ok(None)
                    }
                }
            }
        }
    }

    async fn put(&self, key: &str, value: &RetrievalResult, ttl: Duration) -> Result<()> {
        if let Err(err) = self.primary.put(key, value, ttl).await {
            warn!(error = %err, "primary cache tier write failed");
        }
        if let Err(err) = self.fallback.put(key, value, ttl).await {
            warn!(error = %err, "fallback cache tier write failed");
        }
        Ok(())
    }
}
