//! Detached analytics worker pool
//!
//! Events flow through a bounded channel to a small pool of tokio workers.
//! `record` never blocks: when the queue is full the event is dropped and
//! counted. Sink failures are logged and counted, never raised.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::analytics::AnalyticsSink;
use crate::types::AnalyticsEvent;

/// Counters for recorded, dropped, and failed events
#[derive(Default)]
struct RecorderStats {
    recorded: AtomicU64,
    dropped: AtomicU64,
    failed: AtomicU64,
}

/// Non-blocking analytics recorder backed by a worker pool
#[derive(Clone)]
pub struct AnalyticsRecorder {
    sender: mpsc::Sender<AnalyticsEvent>,
    stats: Arc<RecorderStats>,
}

impl AnalyticsRecorder {
    /// Spawn `workers` detached consumers draining a queue of
    /// `queue_capacity` events into `sink`
    pub fn spawn(
        sink: Arc<dyn AnalyticsSink>,
        queue_capacity: usize,
        workers: usize,
    ) -> Self {
        let (sender, receiver) = mpsc::channel::<AnalyticsEvent>(queue_capacity.max(1));
        let receiver = Arc::new(Mutex::new(receiver));
        let stats = Arc::new(RecorderStats::default());

        for _ in 0..workers.max(1) {
            let receiver = Arc::clone(&receiver);
            let sink = Arc::clone(&sink);
            let stats = Arc::clone(&stats);

            tokio::spawn(async move {
                loop {
                    let event = { receiver.lock().await.recv().await };
                    let Some(event) = event else {
                        break;
                    };

                    match sink.append(&event).await {
                        Ok(()) => {
                            stats.recorded.fetch_add(1, Ordering::Relaxed);
                            debug!(event_id = %event.id, "analytics event persisted");
                        }
                        Err(err) => {
                            stats.failed.fetch_add(1, Ordering::Relaxed);
                            warn!(event_id = %event.id, error = %err, "analytics append failed");
                        }
                    }
                }
            });
        }

        Self { sender, stats }
    }

    /// Enqueue an event without blocking. A full queue drops the event;
    /// retrieval latency is never spent on analytics.
    pub fn record(&self, event: AnalyticsEvent) {
        if let Err(err) = self.sender.try_send(event) {
            self.stats.dropped.fetch_add(1, Ordering::Relaxed);
            warn!(error = %err, "analytics queue full, event dropped");
        }
    }

    /// Events successfully persisted so far
    pub fn recorded_count(&self) -> u64 {
        self.stats.recorded.load(Ordering::Relaxed)
    }

    /// Events dropped due to a full queue
    pub fn dropped_count(&self) -> u64 {
        self.stats.dropped.load(Ordering::Relaxed)
    }

    /// Events whose persistence failed
    pub fn failed_count(&self) -> u64 {
        self.stats.failed.load(Ordering::Relaxed)
    }
}
