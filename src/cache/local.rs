//! Process-local bounded cache tier
//!
//! Fixed-capacity LRU with lazy per-entry expiry: stale entries are
//! discarded on read. This tier never fails; it exists so a requester
//! process degrades gracefully when the shared tier is unreachable.

use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::cache::CacheStore;
use crate::errors::Result;
use crate::types::RetrievalResult;

struct LocalEntry {
    value: RetrievalResult,
    inserted_at: Instant,
    ttl: Duration,
}

impl LocalEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.inserted_at) >= self.ttl
    }
}

/// In-process LRU cache with per-entry TTL
pub struct LocalCache {
    entries: Mutex<LruCache<String, LocalEntry>>,
}

impl LocalCache {
    /// Create a local cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap();
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of live entries (expired entries may still be counted
    /// until their next read)
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for LocalCache {
    async fn get(&self, key: &str) -> Result<Option<RetrievalResult>> {
        let mut entries = self.entries.lock().await;

        let expired = match entries.get(key) {
            Some(entry) => entry.is_expired(Instant::now()),
            None => return Ok(None),
        };

        if expired {
            entries.pop(key);
            return Ok(None);
        }

        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn put(&self, key: &str, value: &RetrievalResult, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.put(
            key.to_string(),
            LocalEntry {
                value: value.clone(),
                inserted_at: Instant::now(),
                ttl,
            },
        );
        Ok(())
    }
}
