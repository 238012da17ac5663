//! Fire-and-forget usage analytics
//!
//! The orchestrator hands each event to [`AnalyticsRecorder::record`] and
//! moves on; persistence happens on detached workers. No analytics failure
//! ever reaches the retrieval path.

use async_trait::async_trait;

use crate::errors::Result;
use crate::types::AnalyticsEvent;

pub mod recorder;

pub use recorder::AnalyticsRecorder;

/// Persistence backend for analytics events.
///
/// Implementations own their backend handle; the retrieval caller's
/// resources may already be released by the time an event is persisted.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn append(&self, event: &AnalyticsEvent) -> Result<()>;
}
