//! Storage collaborator contract for the pipeline.

use async_trait::async_trait;
use thiserror::Error;
use voyage_core::{NewReview, Review, SentimentSummary};

/// Opaque error raised by a [`ReviewStore`] backend.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct StoreError(Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// Where reviews live and where summaries are written back.
///
/// `list_review_texts` must return the location's complete review set from a
/// single consistent read, oldest first. `upsert_summary` replaces the whole
/// summary for the location (pros, cons and timestamp together).
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn insert_review(&self, review: &NewReview) -> Result<Review, StoreError>;

    async fn count_reviews(&self, location_id: &str) -> Result<u64, StoreError>;

    async fn list_review_texts(&self, location_id: &str) -> Result<Vec<String>, StoreError>;

    /// Reviews for a location, newest first, at most `limit` of them.
    async fn list_reviews(&self, location_id: &str, limit: usize)
        -> Result<Vec<Review>, StoreError>;

    async fn upsert_summary(
        &self,
        location_id: &str,
        pros: &[String],
        cons: &[String],
    ) -> Result<SentimentSummary, StoreError>;

    async fn get_summary(&self, location_id: &str)
        -> Result<Option<SentimentSummary>, StoreError>;
}
