//! In-process [`ReviewStore`] backed by a lock-protected `Vec`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use voyage_core::{NewReview, Review, SentimentSummary};

use crate::store::{ReviewStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    reviews: Vec<Review>,
    summaries: HashMap<String, SentimentSummary>,
    next_id: i64,
}

/// Reviews and summaries held in memory for the lifetime of the value.
///
/// Reviews keep insertion order, which doubles as creation order.
#[derive(Debug, Default)]
pub struct InMemoryReviewStore {
    inner: RwLock<Inner>,
}

impl InMemoryReviewStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn insert_review(&self, review: &NewReview) -> Result<Review, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let stored = Review {
            id: inner.next_id,
            public_id: Uuid::new_v4(),
            location_id: review.location_id.clone(),
            text: review.text.clone(),
            rating: review.rating,
            author_name: review.author_name.clone(),
            created_at: Utc::now(),
        };
        inner.reviews.push(stored.clone());
        Ok(stored)
    }

    async fn count_reviews(&self, location_id: &str) -> Result<u64, StoreError> {
        let inner = self.inner.read().await;
        let count = inner
            .reviews
            .iter()
            .filter(|r| r.location_id == location_id)
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn list_review_texts(&self, location_id: &str) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .iter()
            .filter(|r| r.location_id == location_id)
            .map(|r| r.text.clone())
            .collect())
    }

    async fn list_reviews(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<Vec<Review>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .iter()
            .rev()
            .filter(|r| r.location_id == location_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn upsert_summary(
        &self,
        location_id: &str,
        pros: &[String],
        cons: &[String],
    ) -> Result<SentimentSummary, StoreError> {
        let summary = SentimentSummary {
            location_id: location_id.to_string(),
            pros: pros.to_vec(),
            cons: cons.to_vec(),
            updated_at: Utc::now(),
        };
        self.inner
            .write()
            .await
            .summaries
            .insert(location_id.to_string(), summary.clone());
        Ok(summary)
    }

    async fn get_summary(
        &self,
        location_id: &str,
    ) -> Result<Option<SentimentSummary>, StoreError> {
        Ok(self.inner.read().await.summaries.get(location_id).cloned())
    }
}
