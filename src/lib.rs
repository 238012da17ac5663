//! RecallBuddy - Access-Filtered Passage Retrieval Core
//!
//! The retrieval core of a knowledge-augmented assistant: given a free-text
//! query and a requesting identity (user + organization), return a ranked,
//! access-filtered list of document passages for downstream generation.
//!
//! # Architecture
//!
//! - **Cache**: two-tier result cache (shared HTTP tier + local LRU fallback)
//! - **Access**: pure multi-tenant visibility policy, the single security chokepoint
//! - **Retrieval**: orchestrator with over-fetch, degraded retry, and safe fallback
//! - **Analytics**: fire-and-forget usage recording on detached workers

pub mod errors;
pub mod types;
pub mod config;
pub mod access;
pub mod scoring;
pub mod cache;
pub mod search;
pub mod metadata;
pub mod analytics;
pub mod retrieval;

// Re-export commonly used types
pub use errors::{Result, RetrievalError};
pub use types::{
    AnalyticsEvent, Document, DocumentStatus, Passage, RequesterIdentity, RetrievalResult,
    ScoredPassage, Visibility,
};

pub use analytics::{AnalyticsRecorder, AnalyticsSink};
pub use cache::{CacheStore, HttpCache, LocalCache, TieredCache};
pub use config::RetrievalConfig;
pub use metadata::{InMemoryMetadataStore, MetadataStore};
pub use retrieval::Retriever;
pub use search::{Embedder, SearchBackend, SearchHit};
