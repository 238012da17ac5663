//! Document metadata store seam
//!
//! Candidate passages are resolved to their owning documents in one
//! batched call; a per-passage lookup would make filtering latency
//! quadratic in the candidate count. Lookup failure is fatal for the
//! request: passages are never served without a visibility check.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::errors::Result;
use crate::types::Document;

/// Batched read access to document metadata
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Resolve `document_ids` to their metadata. Unknown ids are absent
    /// from the returned map, not an error.
    async fn batch_get_documents(
        &self,
        document_ids: &[String],
    ) -> Result<HashMap<String, Document>>;
}

/// In-memory metadata store, for tests and single-process deployments
#[derive(Default)]
pub struct InMemoryMetadataStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document's metadata
    pub async fn insert(&self, document: Document) {
        self.documents
            .write()
            .await
            .insert(document.id.clone(), document);
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn batch_get_documents(
        &self,
        document_ids: &[String],
    ) -> Result<HashMap<String, Document>> {
        let documents = self.documents.read().await;
        Ok(document_ids
            .iter()
            .filter_map(|id| documents.get(id).map(|doc| (id.clone(), doc.clone())))
            .collect())
    }
}
