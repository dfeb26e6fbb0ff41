//! Sentence classification with a lazily loaded, shared model.
//!
//! A [`ModelLoader`] knows how to bring a [`SentenceModel`] up; the
//! [`SentimentClassifier`] owns the loader and guarantees it runs at most once
//! successfully per classifier instance. Concurrent first callers wait on the
//! same in-flight load instead of starting their own. A failed load is not
//! cached, so the next recompute tries again.

mod lexicon;
mod tei;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::OnceCell;
use voyage_core::ClassifierBackendKind;

use crate::error::SentimentError;
use crate::types::{
    Classification, ClassificationResult, SentenceOutcome, SentimentConfig, SentimentLabel,
    SkipReason,
};

pub use lexicon::{lexicon_score, LexiconLoader, LexiconModel};
pub use tei::{TeiLoader, TeiModel};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A loaded model that labels one sentence at a time.
#[async_trait]
pub trait SentenceModel: Send + Sync {
    /// # Errors
    ///
    /// Returns [`SentimentError::Classification`] when the model cannot
    /// produce a label for `text`.
    async fn classify(&self, text: &str) -> Result<Classification, SentimentError>;
}

/// Brings a [`SentenceModel`] up. Expensive; called once per classifier.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns [`SentimentError::ModelInitialization`] (or any error, which the
    /// classifier reports as one) when the model is unavailable.
    async fn load(&self) -> Result<Arc<dyn SentenceModel>, SentimentError>;
}

/// Classifier handle shared by every recompute in the process.
pub struct SentimentClassifier {
    loader: Box<dyn ModelLoader>,
    model: OnceCell<Arc<dyn SentenceModel>>,
    timeout: Duration,
    min_confidence: f32,
}

impl std::fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("backend", &self.loader.name())
            .field("loaded", &self.is_loaded())
            .field("timeout", &self.timeout)
            .field("min_confidence", &self.min_confidence)
            .finish()
    }
}

impl SentimentClassifier {
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            model: OnceCell::new(),
            timeout: DEFAULT_TIMEOUT,
            min_confidence: 0.0,
        }
    }

    /// Build the classifier selected by `config`. Does not load the model.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ModelInitialization`] if the TEI backend is
    /// selected without a URL, or [`SentimentError::Http`] if its HTTP client
    /// cannot be built.
    pub fn from_config(config: &SentimentConfig) -> Result<Self, SentimentError> {
        let classifier = match config.backend {
            ClassifierBackendKind::Lexicon => Self::new(LexiconLoader),
            ClassifierBackendKind::Tei => {
                let url = config.tei_url.as_deref().ok_or_else(|| {
                    SentimentError::ModelInitialization("TEI backend requires a URL".to_string())
                })?;
                Self::new(TeiLoader::new(url, config.timeout)?)
            }
        };
        Ok(classifier
            .with_timeout(config.timeout)
            .with_min_confidence(config.min_confidence))
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Non-neutral predictions scoring below `min_confidence` are reported
    /// as Neutral.
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.loader.name()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    /// Load the model if no load has succeeded yet, and return it.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ModelInitialization`] if loading fails.
    pub async fn ensure_loaded(&self) -> Result<Arc<dyn SentenceModel>, SentimentError> {
        let model = self
            .model
            .get_or_try_init(|| async {
                let backend = self.loader.name();
                tracing::info!(backend, "loading sentiment model");
                match self.loader.load().await {
                    Ok(model) => {
                        tracing::info!(backend, "sentiment model ready");
                        Ok(model)
                    }
                    Err(SentimentError::ModelInitialization(reason)) => {
                        Err(SentimentError::ModelInitialization(reason))
                    }
                    Err(other) => Err(SentimentError::ModelInitialization(other.to_string())),
                }
            })
            .await?;
        Ok(Arc::clone(model))
    }

    /// Classify one piece of text, loading the model first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ModelInitialization`] if the model cannot be
    /// loaded, [`SentimentError::ClassificationTimeout`] if the model takes
    /// longer than the configured bound, or [`SentimentError::Classification`]
    /// if the model rejects the input.
    pub async fn classify(&self, text: &str) -> Result<Classification, SentimentError> {
        let model = self.ensure_loaded().await?;
        let classification = tokio::time::timeout(self.timeout, model.classify(text))
            .await
            .map_err(|_| SentimentError::ClassificationTimeout(self.timeout))??;
        Ok(self.apply_confidence_floor(classification))
    }

    /// Classify one sentence, turning any failure into a skip.
    ///
    /// A model that panics on the sentence is treated like one that returned
    /// an error; the rest of the batch is unaffected.
    pub async fn classify_sentence(&self, sentence: &str) -> SentenceOutcome {
        let result = match AssertUnwindSafe(self.classify(sentence)).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(SentimentError::Classification(format!(
                "model panicked: {}",
                panic_message(&*payload)
            ))),
        };

        match result {
            Ok(classification) => SentenceOutcome::Classified(ClassificationResult {
                sentence_text: sentence.to_string(),
                label: classification.label,
                score: classification.score,
            }),
            Err(SentimentError::ClassificationTimeout(elapsed)) => {
                tracing::warn!(
                    timeout_ms = elapsed.as_millis(),
                    chars = sentence.chars().count(),
                    "sentence classification timed out; skipping"
                );
                SentenceOutcome::Skipped {
                    sentence_text: sentence.to_string(),
                    reason: SkipReason::TimedOut(elapsed),
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    chars = sentence.chars().count(),
                    "sentence classification failed; skipping"
                );
                SentenceOutcome::Skipped {
                    sentence_text: sentence.to_string(),
                    reason: SkipReason::Failed(e.to_string()),
                }
            }
        }
    }

    fn apply_confidence_floor(&self, classification: Classification) -> Classification {
        if classification.label != SentimentLabel::Neutral
            && classification.score < self.min_confidence
        {
            Classification {
                label: SentimentLabel::Neutral,
                score: classification.score,
            }
        } else {
            classification
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
