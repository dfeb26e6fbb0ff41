use std::time::Duration;

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SentimentError {
    /// The classifier model could not be loaded. Fatal for one recompute.
    #[error("sentiment model initialization failed: {0}")]
    ModelInitialization(String),

    /// One sentence could not be classified. Recovered by skipping it.
    #[error("sentence classification failed: {0}")]
    Classification(String),

    /// One sentence exceeded the per-sentence bound. Recovered by skipping it.
    #[error("sentence classification timed out after {0:?}")]
    ClassificationTimeout(Duration),

    #[error("storage read failed: {0}")]
    StorageRead(#[source] StoreError),

    #[error("storage write failed: {0}")]
    StorageWrite(#[source] StoreError),

    #[error("invalid review: {0}")]
    InvalidReview(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
