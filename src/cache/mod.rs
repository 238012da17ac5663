//! Result caching for retrieval
//!
//! A `CacheStore` holds serialized retrieval results keyed by the
//! deterministic request hash. Two implementations ship here: a shared
//! HTTP-backed tier and a process-local LRU tier, composed by
//! `TieredCache` so the orchestrator never knows which tier answered.
//!
//! Cache entries are already access-filtered for the exact requester the
//! key was computed from, which is why a hit is returned without
//! re-filtering.

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::Result;
use crate::types::RetrievalResult;

pub mod local;
pub mod remote;
pub mod tiered;

pub use local::LocalCache;
pub use remote::HttpCache;
pub use tiered::TieredCache;

/// Key/value store with per-entry expiry.
///
/// `get` and `put` must be safe under concurrent invocation. A race where
/// two concurrent misses both write the same key is acceptable; population
/// is idempotent per key.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a cached result. Expired entries behave as absent.
    async fn get(&self, key: &str) -> Result<Option<RetrievalResult>>;

    /// Store a result under `key` for `ttl`.
    async fn put(&self, key: &str, value: &RetrievalResult, ttl: Duration) -> Result<()>;
}

/// Default cache entry time-to-live
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
