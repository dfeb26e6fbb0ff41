//! Recompute cadence and the per-location background recompute queue.
//!
//! [`RecomputeCadence`] decides from a review count alone whether a new
//! review should trigger a recompute. [`RecomputeQueue`] runs those
//! recomputes off the caller's task, with at most one in flight per location.
//! A request for a location that is already recomputing is folded into a
//! single follow-up run that starts once the current one finishes, so the
//! last write for a location always reflects a read that began after the
//! latest request.

use std::collections::HashMap;
use std::num::NonZeroU64;
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};

use crate::pipeline::SummaryPipeline;

const DEFAULT_EVERY: NonZeroU64 = match NonZeroU64::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Fires on every `every`-th review for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeCadence {
    every: NonZeroU64,
}

impl Default for RecomputeCadence {
    fn default() -> Self {
        Self {
            every: DEFAULT_EVERY,
        }
    }
}

impl RecomputeCadence {
    /// Returns `None` when `every` is zero.
    #[must_use]
    pub fn every(every: u64) -> Option<Self> {
        NonZeroU64::new(every).map(|every| Self { every })
    }

    #[must_use]
    pub fn interval(&self) -> u64 {
        self.every.get()
    }

    /// `true` when `review_count` is a positive multiple of the interval.
    #[must_use]
    pub fn should_recompute(&self, review_count: u64) -> bool {
        review_count > 0 && review_count % self.every.get() == 0
    }
}

/// Whether a location currently has a recompute in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeState {
    Idle,
    Recomputing,
}

/// What [`RecomputeQueue::request`] did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A new background recompute was started.
    Started,
    /// A recompute was already running; one more will run after it.
    Coalesced,
}

#[derive(Debug, Default)]
struct Slot {
    rerun: bool,
}

struct QueueInner {
    pipeline: Arc<SummaryPipeline>,
    slots: Mutex<HashMap<String, Slot>>,
    idle: Notify,
}

/// Background recompute scheduler. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct RecomputeQueue {
    inner: Arc<QueueInner>,
}

impl RecomputeQueue {
    #[must_use]
    pub fn new(pipeline: Arc<SummaryPipeline>) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                pipeline,
                slots: Mutex::new(HashMap::new()),
                idle: Notify::new(),
            }),
        }
    }

    #[must_use]
    pub fn pipeline(&self) -> &Arc<SummaryPipeline> {
        &self.inner.pipeline
    }

    /// Ask for a recompute of `location_id` without waiting for it.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn request(&self, location_id: &str) -> RequestOutcome {
        let mut slots = self.inner.slots.lock().await;
        if let Some(slot) = slots.get_mut(location_id) {
            slot.rerun = true;
            tracing::debug!(
                location = location_id,
                "recompute already in flight; coalescing request"
            );
            return RequestOutcome::Coalesced;
        }
        slots.insert(location_id.to_string(), Slot::default());
        drop(slots);

        let inner = Arc::clone(&self.inner);
        let location_id = location_id.to_string();
        tokio::spawn(async move { inner.drive(location_id).await });
        RequestOutcome::Started
    }

    pub async fn state(&self, location_id: &str) -> RecomputeState {
        if self.inner.slots.lock().await.contains_key(location_id) {
            RecomputeState::Recomputing
        } else {
            RecomputeState::Idle
        }
    }

    /// Wait until no location has a recompute in flight.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.inner.slots.lock().await.is_empty() {
                return;
            }
            notified.await;
        }
    }
}

impl QueueInner {
    async fn drive(self: Arc<Self>, location_id: String) {
        loop {
            self.run_once(&location_id).await;

            let mut slots = self.slots.lock().await;
            match slots.get_mut(&location_id) {
                Some(slot) if slot.rerun => {
                    slot.rerun = false;
                    tracing::info!(
                        location = %location_id,
                        "running coalesced sentiment recompute"
                    );
                }
                _ => {
                    slots.remove(&location_id);
                    drop(slots);
                    self.idle.notify_waiters();
                    return;
                }
            }
        }
    }

    /// One full recompute. Failures and panics end here; they are logged and
    /// the previously stored summary stays in place.
    async fn run_once(&self, location_id: &str) {
        let pipeline = Arc::clone(&self.pipeline);
        let location = location_id.to_string();
        let handle = tokio::spawn(async move { pipeline.recompute_summary(&location).await });

        match handle.await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                tracing::error!(
                    location = location_id,
                    error = %e,
                    "sentiment recompute failed; keeping previous summary"
                );
            }
            Err(join_err) => {
                tracing::error!(
                    location = location_id,
                    error = %join_err,
                    "sentiment recompute task aborted; keeping previous summary"
                );
            }
        }
    }
}
