//! Core types for document retrieval and attribution
//!
//! Documents and passages are owned by the ingestion subsystem; this core
//! only reads their metadata. `RetrievalResult` and `AnalyticsEvent` are
//! created here and owned by the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who may see a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to every organization
    Public,
    /// Visible to the organizations in `shared_with` (or all, if unset)
    Shared,
    /// Visible only to the owning organization
    Internal,
}

/// Ingestion lifecycle state of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Completed,
    Failed,
    Removed,
}

/// Document metadata as read from the metadata store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Opaque document identifier
    pub id: String,
    /// Owning organization
    pub org_id: String,
    /// Visibility mode
    pub visibility: Visibility,
    /// Organizations this document is shared with; `None` means shared
    /// with every organization
    pub shared_with: Option<Vec<String>>,
    /// Ingestion status; only `Completed` documents are retrievable
    pub status: DocumentStatus,
    /// Optional expiry; a document at or past this instant is not retrievable
    pub expires_at: Option<DateTime<Utc>>,
}

/// A retrievable unit of document text with its embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// Back-reference to the owning document
    pub document_id: String,
    /// Raw passage text
    pub text: String,
    /// Embedded vector as stored in the similarity index
    pub embedding: Vec<f32>,
    /// Advisory source-location hint; not guaranteed accurate
    pub page: Option<u32>,
}

/// A passage retained after access filtering, with its normalized confidence
/// and the document metadata needed for attribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPassage {
    pub passage: Passage,
    /// Normalized confidence in [0.0, 1.0]
    pub confidence: f32,
    /// Owning document id (attribution)
    pub document_id: String,
    /// Owning organization (attribution)
    pub document_org_id: String,
    /// Visibility mode of the owning document (attribution)
    pub document_visibility: Visibility,
}

/// Ordered, access-filtered retrieval result; immutable once returned
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Passages ranked by confidence descending
    pub passages: Vec<ScoredPassage>,
    /// Whether this result was served from cache
    #[serde(default)]
    pub from_cache: bool,
}

impl RetrievalResult {
    /// Empty result, used when the search backend is unavailable
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Document ids of all passages, in rank order (for analytics)
    pub fn document_ids(&self) -> Vec<String> {
        self.passages
            .iter()
            .map(|p| p.document_id.clone())
            .collect()
    }
}

/// Identity of the caller issuing a retrieval request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequesterIdentity {
    pub user_id: String,
    pub org_id: String,
}

impl RequesterIdentity {
    pub fn new(user_id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            org_id: org_id.into(),
        }
    }
}

/// Usage event emitted per uncached retrieval; consumed asynchronously
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Event id
    pub id: Uuid,
    /// Original query text
    pub query: String,
    /// Requesting user
    pub user_id: String,
    /// Requesting organization
    pub org_id: String,
    /// Document ids present in the returned result
    pub document_ids: Vec<String>,
    /// When the retrieval completed
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Build an event for a completed retrieval
    pub fn for_retrieval(
        query: &str,
        requester: &RequesterIdentity,
        result: &RetrievalResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.to_string(),
            user_id: requester.user_id.clone(),
            org_id: requester.org_id.clone(),
            document_ids: result.document_ids(),
            timestamp: Utc::now(),
        }
    }
}
