//! Retrieval orchestrator
//!
//! Coordinates cache, similarity search, access filtering, confidence
//! normalization, and analytics. Both the happy path and the degraded
//! retry filter through the same access chokepoint; no branch
//! re-implements visibility rules.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::access::is_visible;
use crate::analytics::AnalyticsRecorder;
use crate::cache::CacheStore;
use crate::config::RetrievalConfig;
use crate::errors::{Result, RetrievalError};
use crate::metadata::MetadataStore;
use crate::retrieval::compute_cache_key;
use crate::scoring::confidence;
use crate::search::{SearchBackend, SearchHit};
use crate::types::{AnalyticsEvent, Document, RequesterIdentity, RetrievalResult, ScoredPassage};

/// Access-filtered passage retrieval, the sole public entry point of the core
pub struct Retriever {
    search: Arc<dyn SearchBackend>,
    metadata: Arc<dyn MetadataStore>,
    cache: Arc<dyn CacheStore>,
    analytics: AnalyticsRecorder,
    config: RetrievalConfig,
}

impl Retriever {
    pub fn new(
        search: Arc<dyn SearchBackend>,
        metadata: Arc<dyn MetadataStore>,
        cache: Arc<dyn CacheStore>,
        analytics: AnalyticsRecorder,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            search,
            metadata,
            cache,
            analytics,
            config,
        }
    }

    /// Retrieve up to `k` access-filtered passages for `query`.
    ///
    /// Returns a possibly empty ranked list, or fails with
    /// `IdentityRequired` / `MetadataUnavailable`. Cache and analytics
    /// problems never fail a request.
    pub async fn retrieve(
        &self,
        query: &str,
        requester: &RequesterIdentity,
        k: usize,
        include_external: bool,
    ) -> Result<RetrievalResult> {
        if requester.user_id.trim().is_empty() {
            return Err(RetrievalError::IdentityRequired("user id is blank".into()));
        }
        if requester.org_id.trim().is_empty() {
            return Err(RetrievalError::IdentityRequired(
                "organization id is blank".into(),
            ));
        }
        if k == 0 {
            return Err(RetrievalError::InvalidParams("k must be at least 1".into()));
        }

        let key = compute_cache_key(query, requester, k, include_external);

        // Cache entries are already access-filtered for this exact key
        // (requester identity is part of it), so hits return unmodified
        match self.cache.get(&key).await {
            Ok(Some(mut cached)) => {
                debug!(%key, "cache hit");
                cached.from_cache = true;
                return Ok(cached);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, treating as miss");
            }
        }

        // Over-fetch to compensate for candidates the visibility filter
        // discards; the cap bounds worst-case latency
        let overfetch = k
            .saturating_mul(self.config.overfetch_factor)
            .min(self.config.max_candidates);

        let (hits, degraded) = match self.search.search(query, overfetch).await {
            Ok(hits) => (hits, false),
            Err(err) => {
                warn!(error = %err, "search backend failed, retrying degraded at k candidates");
                match self.search.search(query, k).await {
                    Ok(hits) => (hits, true),
                    Err(err) => {
                        // Empty-but-safe beats a crash in a user-facing
                        // query path; the result is not cached so the key
                        // recovers as soon as the backend does
                        warn!(error = %err, "degraded search failed, returning empty result");
                        let empty = RetrievalResult::empty();
                        self.dispatch_analytics(query, requester, &empty);
                        return Ok(empty);
                    }
                }
            }
        };

        debug!(
            candidates = hits.len(),
            degraded, "filtering search candidates"
        );

        let result = self
            .filter_and_score(hits, requester, k, include_external)
            .await?;

        if let Err(err) = self
            .cache
            .put(&key, &result, Duration::from_secs(self.config.cache_ttl_secs))
            .await
        {
            warn!(error = %err, "cache write failed, continuing");
        }

        self.dispatch_analytics(query, requester, &result);

        Ok(result)
    }

    /// Resolve candidate metadata in one batch, apply the visibility
    /// chokepoint, and clamp confidences. Shared by the happy path and the
    /// degraded retry.
    async fn filter_and_score(
        &self,
        hits: Vec<SearchHit>,
        requester: &RequesterIdentity,
        k: usize,
        include_external: bool,
    ) -> Result<RetrievalResult> {
        if hits.is_empty() {
            return Ok(RetrievalResult::empty());
        }

        let mut document_ids: Vec<String> = Vec::new();
        for hit in &hits {
            if !document_ids.contains(&hit.passage.document_id) {
                document_ids.push(hit.passage.document_id.clone());
            }
        }

        // Serving passages without verified visibility would be a security
        // violation, so a metadata failure is fatal for the request
        let documents = self
            .metadata
            .batch_get_documents(&document_ids)
            .await
            .map_err(|err| RetrievalError::MetadataUnavailable(err.to_string()))?;

        let now = Utc::now();
        let mut passages = Vec::with_capacity(k);

        for hit in hits {
            if passages.len() >= k {
                break;
            }

            // A candidate without resolvable metadata cannot be checked,
            // so it is never served
            let Some(document) = documents.get(&hit.passage.document_id) else {
                debug!(document_id = %hit.passage.document_id, "no metadata for candidate, skipping");
                continue;
            };

            if !is_visible(document, &requester.org_id, now) {
                continue;
            }

            if !include_external && is_external_share(document, &requester.org_id) {
                continue;
            }

            passages.push(ScoredPassage {
                confidence: confidence(hit.raw_similarity),
                document_id: document.id.clone(),
                document_org_id: document.org_id.clone(),
                document_visibility: document.visibility,
                passage: hit.passage,
            });
        }

        Ok(RetrievalResult {
            passages,
            from_cache: false,
        })
    }

    fn dispatch_analytics(
        &self,
        query: &str,
        requester: &RequesterIdentity,
        result: &RetrievalResult,
    ) {
        let event = AnalyticsEvent::for_retrieval(query, requester, result);
        // Fire-and-forget: the result has already been assembled and the
        // recorder never blocks or raises
        self.analytics.record(event);
    }
}

/// Whether `document` reaches the requester only through cross-organization
/// sharing (the content `include_external = false` excludes)
fn is_external_share(document: &Document, requester_org_id: &str) -> bool {
    use crate::types::Visibility;
    document.visibility == Visibility::Shared && document.org_id != requester_org_id
}
