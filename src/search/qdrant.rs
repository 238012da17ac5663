//! Qdrant-backed similarity search
//!
//! Searches a single passage collection. Passage text, owning document id,
//! and the advisory page hint travel in the point payload; the point vector
//! is returned alongside so hits carry their embeddings.

use anyhow::{Context, Result as AnyResult};
use qdrant_client::{
    client::QdrantClient,
    qdrant::{
        vectors::VectorsOptions, with_payload_selector::SelectorOptions,
        with_vectors_selector, SearchPoints, Value as QdrantValue, WithPayloadSelector,
        WithVectorsSelector,
    },
};
use std::sync::Arc;

use crate::errors::{Result, RetrievalError};
use crate::search::{Embedder, SearchBackend, SearchHit};
use crate::types::Passage;

/// Payload key holding the passage text
const PAYLOAD_TEXT: &str = "text";
/// Payload key holding the owning document id
const PAYLOAD_DOCUMENT_ID: &str = "document_id";
/// Payload key holding the advisory page hint
const PAYLOAD_PAGE: &str = "page";

/// Similarity search over a qdrant passage collection
pub struct QdrantSearchBackend {
    client: QdrantClient,
    collection: String,
    embedder: Arc<dyn Embedder>,
}

impl QdrantSearchBackend {
    /// Connect to qdrant at `url`, searching `collection`
    pub fn new(
        url: &str,
        collection: impl Into<String>,
        embedder: Arc<dyn Embedder>,
    ) -> AnyResult<Self> {
        let client = QdrantClient::from_url(url)
            .build()
            .context("Failed to create qdrant client")?;

        Ok(Self {
            client,
            collection: collection.into(),
            embedder,
        })
    }

    fn hit_from_point(point: qdrant_client::qdrant::ScoredPoint) -> SearchHit {
        let payload = point.payload;

        let text = payload
            .get(PAYLOAD_TEXT)
            .and_then(qdrant_value_to_string)
            .unwrap_or_default();
        let document_id = payload
            .get(PAYLOAD_DOCUMENT_ID)
            .and_then(qdrant_value_to_string)
            .unwrap_or_default();
        let page = payload
            .get(PAYLOAD_PAGE)
            .and_then(qdrant_value_to_u32);

        let embedding = point
            .vectors
            .and_then(|v| v.vectors_options)
            .map(|options| match options {
                VectorsOptions::Vector(vector) => vector.data,
                _ => Vec::new(),
            })
            .unwrap_or_default();

        SearchHit {
            passage: Passage {
                document_id,
                text,
                embedding,
                page,
            },
            raw_similarity: point.score,
        }
    }
}

#[async_trait::async_trait]
impl SearchBackend for QdrantSearchBackend {
    async fn search(&self, query: &str, top_n: usize) -> Result<Vec<SearchHit>> {
        let vector = self.embedder.embed(query).await?;

        let search_result = self
            .client
            .search_points(&SearchPoints {
                collection_name: self.collection.clone(),
                vector,
                limit: top_n as u64,
                with_payload: Some(WithPayloadSelector {
                    selector_options: Some(SelectorOptions::Enable(true)),
                }),
                with_vectors: Some(WithVectorsSelector {
                    selector_options: Some(with_vectors_selector::SelectorOptions::Enable(true)),
                }),
                ..Default::default()
            })
            .await
            .map_err(|e| RetrievalError::SearchBackendUnavailable(e.to_string()))?;

        Ok(search_result
            .result
            .into_iter()
            .map(Self::hit_from_point)
            .collect())
    }
}

fn qdrant_value_to_string(value: &QdrantValue) -> Option<String> {
    value.kind.as_ref().and_then(|kind| {
        use qdrant_client::qdrant::value::Kind;
        match kind {
            Kind::StringValue(s) => Some(s.clone()),
            _ => None,
        }
    })
}

fn qdrant_value_to_u32(value: &QdrantValue) -> Option<u32> {
    value.kind.as_ref().and_then(|kind| {
        use qdrant_client::qdrant::value::Kind;
        match kind {
            Kind::IntegerValue(i) => u32::try_from(*i).ok(),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;

    struct FixedEmbedder;

    #[async_trait::async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.1; 768])
        }
    }

    #[tokio::test]
    #[ignore] // Integration test - requires Qdrant
    async fn test_search_against_live_qdrant() {
        let backend = QdrantSearchBackend::new(
            "http://localhost:6334",
            "passages",
            Arc::new(FixedEmbedder),
        )
        .unwrap();

        let hits = backend.search("test query", 5).await.unwrap();
        assert!(hits.len() <= 5);
    }
}
