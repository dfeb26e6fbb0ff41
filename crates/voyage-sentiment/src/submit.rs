//! Review submission: validate, store, and maybe schedule a recompute.

use std::sync::Arc;

use voyage_core::{NewReview, Review, MAX_RATING, MIN_RATING};

use crate::error::SentimentError;
use crate::store::ReviewStore;
use crate::trigger::{RecomputeCadence, RecomputeQueue, RequestOutcome};

/// What happened to a submitted review.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub review: Review,
    /// Reviews stored for the location after this one, if the count could
    /// be read.
    pub review_count: Option<u64>,
    /// Set when the cadence fired and a recompute was requested.
    pub recompute: Option<RequestOutcome>,
}

/// Write path for new reviews.
#[derive(Clone)]
pub struct ReviewSubmitter {
    store: Arc<dyn ReviewStore>,
    queue: RecomputeQueue,
    cadence: RecomputeCadence,
}

impl ReviewSubmitter {
    #[must_use]
    pub fn new(
        store: Arc<dyn ReviewStore>,
        queue: RecomputeQueue,
        cadence: RecomputeCadence,
    ) -> Self {
        Self {
            store,
            queue,
            cadence,
        }
    }

    #[must_use]
    pub fn queue(&self) -> &RecomputeQueue {
        &self.queue
    }

    /// Validate and store a review, then request a background recompute if
    /// the location's new review count hits the cadence.
    ///
    /// Returns as soon as the review is written; the recompute (if any) runs
    /// on its own task and its outcome never affects this result. A failure
    /// to count reviews after the write is logged and skips the trigger.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidReview`] if the location or text is
    /// blank or the rating is outside `1..=5`, and
    /// [`SentimentError::StorageWrite`] if the review cannot be stored.
    pub async fn submit(&self, review: NewReview) -> Result<SubmitOutcome, SentimentError> {
        let review = normalize(review)?;
        let location_id = review.location_id.clone();

        let stored = self
            .store
            .insert_review(&review)
            .await
            .map_err(SentimentError::StorageWrite)?;

        let review_count = match self.store.count_reviews(&location_id).await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!(
                    location = %location_id,
                    error = %e,
                    "review stored but count failed; skipping recompute trigger"
                );
                None
            }
        };

        let recompute = match review_count {
            Some(count) if self.cadence.should_recompute(count) => {
                tracing::info!(
                    location = %location_id,
                    review_count = count,
                    "review cadence reached; requesting sentiment recompute"
                );
                Some(self.queue.request(&location_id).await)
            }
            _ => None,
        };

        Ok(SubmitOutcome {
            review: stored,
            review_count,
            recompute,
        })
    }
}

fn normalize(review: NewReview) -> Result<NewReview, SentimentError> {
    let location_id = review.location_id.trim().to_string();
    if location_id.is_empty() {
        return Err(SentimentError::InvalidReview(
            "location is required".to_string(),
        ));
    }

    let text = review.text.trim().to_string();
    if text.is_empty() {
        return Err(SentimentError::InvalidReview("text is required".to_string()));
    }

    if !(MIN_RATING..=MAX_RATING).contains(&review.rating) {
        return Err(SentimentError::InvalidReview(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
            review.rating
        )));
    }

    let author_name = review
        .author_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    Ok(NewReview {
        location_id,
        text,
        rating: review.rating,
        author_name,
    })
}
