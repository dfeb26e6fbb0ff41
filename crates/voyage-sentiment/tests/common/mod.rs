//! Shared fakes for the sentiment integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};
use voyage_core::{NewReview, Review, SentimentSummary};
use voyage_sentiment::{
    Classification, InMemoryReviewStore, ModelLoader, ReviewStore, SentenceModel,
    SentimentError, SentimentLabel, StoreError,
};

/// Sentences starting with this fail to classify.
pub const FAIL_PREFIX: &str = "FAIL";
/// Sentences starting with this never finish classifying.
pub const HANG_PREFIX: &str = "HANG";
/// Sentences starting with this panic inside the model.
pub const PANIC_PREFIX: &str = "PANIC";

/// Model that answers from a fixed table. Unknown sentences are Neutral.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    labels: HashMap<String, (SentimentLabel, f32)>,
    delays: HashMap<String, Duration>,
}

#[async_trait]
impl SentenceModel for ScriptedModel {
    async fn classify(&self, text: &str) -> Result<Classification, SentimentError> {
        if text.starts_with(FAIL_PREFIX) {
            return Err(SentimentError::Classification(format!("scripted failure: {text}")));
        }
        if text.starts_with(HANG_PREFIX) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        assert!(!text.starts_with(PANIC_PREFIX), "scripted panic");
        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }

        let (label, score) = self
            .labels
            .get(text)
            .copied()
            .unwrap_or((SentimentLabel::Neutral, 0.9));
        Ok(Classification { label, score })
    }
}

/// Loader for [`ScriptedModel`] that counts loads and can fail the first few.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLoader {
    labels: HashMap<String, (SentimentLabel, f32)>,
    delays: HashMap<String, Duration>,
    pub loads: Arc<AtomicUsize>,
    failures_left: Arc<AtomicUsize>,
    load_delay: Option<Duration>,
}

impl ScriptedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, text: &str, label: SentimentLabel) -> Self {
        self.labels.insert(text.to_string(), (label, 0.9));
        self
    }

    pub fn label_with_score(mut self, text: &str, label: SentimentLabel, score: f32) -> Self {
        self.labels.insert(text.to_string(), (label, score));
        self
    }

    /// Hold the answer for `text` back by `delay`.
    pub fn delay(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    /// Fail the next `n` loads.
    pub fn failing_loads(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    pub fn slow_load(mut self, delay: Duration) -> Self {
        self.load_delay = Some(delay);
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelLoader for ScriptedLoader {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn load(&self) -> Result<Arc<dyn SentenceModel>, SentimentError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.load_delay {
            tokio::time::sleep(delay).await;
        }
        let remaining = self.failures_left.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_left.store(remaining - 1, Ordering::SeqCst);
            return Err(SentimentError::ModelInitialization(
                "scripted load failure".to_string(),
            ));
        }
        Ok(Arc::new(ScriptedModel {
            labels: self.labels.clone(),
            delays: self.delays.clone(),
        }))
    }
}

#[derive(Debug)]
struct Injected(&'static str);

impl std::fmt::Display for Injected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "injected {} failure", self.0)
    }
}

impl std::error::Error for Injected {}

/// In-memory store with switchable failures, a read counter and an optional
/// gate that holds every `list_review_texts` call until a permit is added.
/// A gated read takes its snapshot before waiting, so writes made while it
/// waits are only visible to later reads.
#[derive(Debug, Default)]
pub struct TestStore {
    inner: InMemoryReviewStore,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_counts: AtomicBool,
    reads: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
    /// Signalled each time a read reaches the gate.
    pub entered: Notify,
}

impl TestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose reads block until `gate` has a permit for them.
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub async fn seed(&self, location_id: &str, texts: &[&str]) {
        for text in texts {
            self.inner
                .insert_review(&new_review(location_id, text))
                .await
                .expect("in-memory insert");
        }
    }
}

#[async_trait]
impl ReviewStore for TestStore {
    async fn insert_review(&self, review: &NewReview) -> Result<Review, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::new(Injected("write")));
        }
        self.inner.insert_review(review).await
    }

    async fn count_reviews(&self, location_id: &str) -> Result<u64, StoreError> {
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(StoreError::new(Injected("count")));
        }
        self.inner.count_reviews(location_id).await
    }

    async fn list_review_texts(&self, location_id: &str) -> Result<Vec<String>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let snapshot = if self.fail_reads.load(Ordering::SeqCst) {
            Err(StoreError::new(Injected("read")))
        } else {
            self.inner.list_review_texts(location_id).await
        };
        self.entered.notify_one();
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate open").forget();
        }
        snapshot
    }

    async fn list_reviews(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<Vec<Review>, StoreError> {
        self.inner.list_reviews(location_id, limit).await
    }

    async fn upsert_summary(
        &self,
        location_id: &str,
        pros: &[String],
        cons: &[String],
    ) -> Result<SentimentSummary, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::new(Injected("write")));
        }
        self.inner.upsert_summary(location_id, pros, cons).await
    }

    async fn get_summary(
        &self,
        location_id: &str,
    ) -> Result<Option<SentimentSummary>, StoreError> {
        self.inner.get_summary(location_id).await
    }
}

pub fn new_review(location_id: &str, text: &str) -> NewReview {
    NewReview {
        location_id: location_id.to_string(),
        text: text.to_string(),
        rating: 4,
        author_name: None,
    }
}
