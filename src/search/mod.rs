//! Similarity-search backend seam
//!
//! The vector index is a black box behind `SearchBackend`: it owns passage
//! storage and returns ranked hits with raw similarity scores. The core
//! never writes to it. A qdrant-backed implementation lives in
//! [`qdrant::QdrantSearchBackend`]; tests substitute in-process fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::types::Passage;

pub mod qdrant;

pub use qdrant::QdrantSearchBackend;

/// A ranked candidate from the similarity index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Passage payload as stored by the index
    pub passage: Passage,
    /// Raw similarity score; range is backend-dependent and clamped later
    pub raw_similarity: f32,
}

/// Black-box similarity search over the passage index
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Return up to `top_n` passages ranked by raw similarity descending
    async fn search(&self, query: &str, top_n: usize) -> Result<Vec<SearchHit>>;
}

/// Query-text embedding, supplied by the surrounding application.
///
/// Embedding computation is out of scope for this core; concrete backends
/// that need a vector (qdrant) take an `Embedder` at construction.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
