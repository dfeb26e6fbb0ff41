//! Summary recompute orchestration.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use voyage_core::SentimentSummary;

use crate::classifier::SentimentClassifier;
use crate::collector::{CollectStats, CollectedSummary, ProsConsCollector};
use crate::error::SentimentError;
use crate::segmenter::split_sentences;
use crate::store::ReviewStore;

/// Result of one successful recompute.
#[derive(Debug, Clone)]
pub struct RecomputeReport {
    /// The summary as persisted.
    pub summary: SentimentSummary,
    pub stats: CollectStats,
}

/// Reads a location's reviews, classifies every sentence and writes back the
/// pros/cons summary.
pub struct SummaryPipeline {
    store: Arc<dyn ReviewStore>,
    classifier: Arc<SentimentClassifier>,
    concurrency: usize,
}

impl SummaryPipeline {
    pub fn new(store: Arc<dyn ReviewStore>, classifier: Arc<SentimentClassifier>) -> Self {
        Self {
            store,
            classifier,
            concurrency: 1,
        }
    }

    /// Classify up to `concurrency` sentences at once. Output order is
    /// unaffected. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn ReviewStore> {
        &self.store
    }

    #[must_use]
    pub fn classifier(&self) -> &Arc<SentimentClassifier> {
        &self.classifier
    }

    /// Recompute and persist the summary for one location.
    ///
    /// 1. Ensure the classifier model is loaded (fatal on failure).
    /// 2. Read every review text for the location in one pass, oldest first.
    /// 3. Split each review into sentences and classify them in source order.
    /// 4. Fold the outcomes into capped, deduplicated pros and cons.
    /// 5. Replace the stored summary with the result.
    ///
    /// Each call is an independent full recompute; repeated calls over an
    /// unchanged review set produce identical lists. On any error the stored
    /// summary is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ModelInitialization`] if the model cannot be
    /// loaded, [`SentimentError::StorageRead`] if reviews cannot be read, or
    /// [`SentimentError::StorageWrite`] if the upsert fails. Individual
    /// sentence failures are skipped and counted in [`CollectStats::skipped`].
    pub async fn recompute_summary(
        &self,
        location_id: &str,
    ) -> Result<RecomputeReport, SentimentError> {
        let collected = self.preview(location_id).await?;

        let summary = self
            .store
            .upsert_summary(location_id, &collected.pros, &collected.cons)
            .await
            .map_err(SentimentError::StorageWrite)?;

        tracing::info!(
            location = location_id,
            reviews = collected.stats.reviews,
            sentences = collected.stats.sentences,
            pros = summary.pros.len(),
            cons = summary.cons.len(),
            skipped = collected.stats.skipped,
            "sentiment summary recomputed"
        );

        Ok(RecomputeReport {
            summary,
            stats: collected.stats,
        })
    }

    /// Run steps 1-4 of [`recompute_summary`](Self::recompute_summary)
    /// without writing anything.
    ///
    /// # Errors
    ///
    /// Same as [`recompute_summary`](Self::recompute_summary), minus
    /// [`SentimentError::StorageWrite`].
    pub async fn preview(&self, location_id: &str) -> Result<CollectedSummary, SentimentError> {
        self.classifier.ensure_loaded().await?;

        let texts = self
            .store
            .list_review_texts(location_id)
            .await
            .map_err(SentimentError::StorageRead)?;

        if texts.is_empty() {
            tracing::info!(
                location = location_id,
                "no reviews for location; summary will be empty"
            );
        }

        let sentences: Vec<String> = texts
            .iter()
            .flat_map(|t| split_sentences(t))
            .map(str::to_string)
            .collect();
        let classifier = Arc::clone(&self.classifier);

        let mut outcomes = stream::iter(sentences)
            .map(move |sentence| {
                let classifier = Arc::clone(&classifier);
                async move { classifier.classify_sentence(&sentence).await }
            })
            .buffered(self.concurrency);

        let mut collector = ProsConsCollector::new();
        while let Some(outcome) = outcomes.next().await {
            collector.push(outcome);
        }

        let mut collected = collector.finish();
        collected.stats.reviews = texts.len();
        Ok(collected)
    }
}
