//! Review sentiment aggregation for Voyage.
//!
//! Turns the free-text reviews stored for a location into a short,
//! deduplicated list of pros and cons. Each review is split into sentences,
//! every sentence is classified by a lazily loaded sentiment model, and the
//! Positive / Negative sentences are folded into capped, first-seen-wins lists
//! that replace the location's stored summary.
//!
//! New reviews trigger a background recompute on a fixed cadence (every fifth
//! review by default). Recomputes are serialized per location: a trigger that
//! arrives while one is in flight is coalesced into a single follow-up run.

pub mod classifier;
pub mod collector;
pub mod error;
pub mod memory;
pub mod pipeline;
pub mod segmenter;
pub mod store;
pub mod submit;
pub mod trigger;
pub mod types;

pub use classifier::{
    lexicon_score, LexiconLoader, ModelLoader, SentenceModel, SentimentClassifier, TeiLoader,
};
pub use collector::{
    collect_pros_cons, CollectStats, CollectedSummary, ProsConsCollector, MAX_PHRASES,
};
pub use error::SentimentError;
pub use memory::InMemoryReviewStore;
pub use pipeline::{RecomputeReport, SummaryPipeline};
pub use segmenter::split_sentences;
pub use store::{ReviewStore, StoreError};
pub use submit::{ReviewSubmitter, SubmitOutcome};
pub use trigger::{RecomputeCadence, RecomputeQueue, RecomputeState, RequestOutcome};
pub use types::{
    Classification, ClassificationResult, SentenceOutcome, SentimentConfig, SentimentLabel,
    SkipReason,
};
