//! Retrieval orchestration
//!
//! `Retriever` is the sole public entry point of the core: cache lookup,
//! over-fetched similarity search, batched metadata resolution, access
//! filtering, confidence normalization, cache population, and analytics
//! dispatch.

pub mod cache_key;
pub mod orchestrator;

pub use cache_key::compute_cache_key;
pub use orchestrator::Retriever;
