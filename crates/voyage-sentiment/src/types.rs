use std::time::Duration;

use serde::{Deserialize, Serialize};
use voyage_core::{AppConfig, ClassifierBackendKind};

/// Single-label sentiment assigned to one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Map a model's label name onto a sentiment label.
    ///
    /// Matching is case-insensitive and accepts the common short forms
    /// (`POS`, `NEG`, `NEU`). Returns `None` for anything else.
    #[must_use]
    pub fn from_model_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" => Some(Self::Positive),
            "negative" | "neg" => Some(Self::Negative),
            "neutral" | "neu" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Negative => write!(f, "negative"),
            SentimentLabel::Neutral => write!(f, "neutral"),
        }
    }
}

/// What a model says about one piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: SentimentLabel,
    /// Model confidence in `[0.0, 1.0]`.
    pub score: f32,
}

/// A classified sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub sentence_text: String,
    pub label: SentimentLabel,
    pub score: f32,
}

/// Why a sentence was left out of a recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Failed(String),
    TimedOut(Duration),
}

/// Per-sentence result fed to the collector.
#[derive(Debug, Clone, PartialEq)]
pub enum SentenceOutcome {
    Classified(ClassificationResult),
    Skipped {
        sentence_text: String,
        reason: SkipReason,
    },
}

/// Tuning for the classifier and recompute pipeline.
#[derive(Debug, Clone)]
pub struct SentimentConfig {
    pub backend: ClassifierBackendKind,
    pub tei_url: Option<String>,
    /// Upper bound for classifying one sentence.
    pub timeout: Duration,
    /// Sentences classified concurrently within one recompute.
    pub concurrency: usize,
    /// Non-neutral predictions scoring below this become Neutral.
    pub min_confidence: f32,
    /// A recompute fires when a location's review count is a multiple of this.
    pub recompute_every: u64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            backend: ClassifierBackendKind::Lexicon,
            tei_url: None,
            timeout: Duration::from_millis(5000),
            concurrency: 4,
            min_confidence: 0.0,
            recompute_every: 5,
        }
    }
}

impl SentimentConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            backend: config.sentiment_backend,
            tei_url: config.sentiment_tei_url.clone(),
            timeout: Duration::from_millis(config.sentiment_timeout_ms),
            concurrency: config.sentiment_concurrency,
            min_confidence: config.sentiment_min_confidence,
            recompute_every: config.recompute_every,
        }
    }
}
