//! [`ReviewStore`] over the Postgres tables in `voyage-db`.

use async_trait::async_trait;
use sqlx::PgPool;
use voyage_core::{NewReview, Review, SentimentSummary};
use voyage_sentiment::{ReviewStore, StoreError};

#[derive(Debug, Clone)]
pub(crate) struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn insert_review(&self, review: &NewReview) -> Result<Review, StoreError> {
        voyage_db::insert_review(&self.pool, review)
            .await
            .map(Review::from)
            .map_err(StoreError::new)
    }

    async fn count_reviews(&self, location_id: &str) -> Result<u64, StoreError> {
        let count = voyage_db::count_reviews_for_location(&self.pool, location_id)
            .await
            .map_err(StoreError::new)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn list_review_texts(&self, location_id: &str) -> Result<Vec<String>, StoreError> {
        voyage_db::list_review_texts_for_location(&self.pool, location_id)
            .await
            .map_err(StoreError::new)
    }

    async fn list_reviews(
        &self,
        location_id: &str,
        limit: usize,
    ) -> Result<Vec<Review>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = voyage_db::list_reviews_for_location(&self.pool, location_id, limit)
            .await
            .map_err(StoreError::new)?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn upsert_summary(
        &self,
        location_id: &str,
        pros: &[String],
        cons: &[String],
    ) -> Result<SentimentSummary, StoreError> {
        voyage_db::upsert_sentiment_summary(&self.pool, location_id, pros, cons)
            .await
            .map(SentimentSummary::from)
            .map_err(StoreError::new)
    }

    async fn get_summary(
        &self,
        location_id: &str,
    ) -> Result<Option<SentimentSummary>, StoreError> {
        voyage_db::get_sentiment_summary(&self.pool, location_id)
            .await
            .map(|row| row.map(SentimentSummary::from))
            .map_err(StoreError::new)
    }
}
