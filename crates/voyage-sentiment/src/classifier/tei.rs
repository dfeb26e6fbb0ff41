//! Sequence-classification client for Text Embeddings Inference (TEI).
//!
//! TEI serves Hugging Face classifiers such as
//! `distilbert-base-uncased-finetuned-sst-2-english` behind `/predict`.
//! Loading checks `/info` to confirm the served model is a classifier whose
//! labels are all sentiment labels.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ModelLoader, SentenceModel};
use crate::error::SentimentError;
use crate::types::{Classification, SentimentLabel};

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f32,
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    model_id: String,
    model_type: serde_json::Value,
}

/// Connects to a TEI server and verifies it serves a sentiment classifier.
#[derive(Debug, Clone)]
pub struct TeiLoader {
    client: reqwest::Client,
    base_url: String,
}

impl TeiLoader {
    /// Create a loader for the TEI server at `tei_url`.
    ///
    /// `request_timeout` bounds every HTTP call made by the loaded model.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(tei_url: &str, request_timeout: Duration) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: tei_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ModelLoader for TeiLoader {
    fn name(&self) -> &'static str {
        "tei"
    }

    async fn load(&self) -> Result<Arc<dyn SentenceModel>, SentimentError> {
        let response = self
            .client
            .get(format!("{}/info", self.base_url))
            .send()
            .await
            .map_err(|e| {
                SentimentError::ModelInitialization(format!("TEI info request failed: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(SentimentError::ModelInitialization(format!(
                "TEI info returned status {}",
                response.status()
            )));
        }

        let info: InfoResponse = response.json().await.map_err(|e| {
            SentimentError::ModelInitialization(format!("TEI info parse error: {e}"))
        })?;

        let id2label = info
            .model_type
            .get("classifier")
            .and_then(|c| c.get("id2label"))
            .and_then(serde_json::Value::as_object)
            .ok_or_else(|| {
                SentimentError::ModelInitialization(format!(
                    "TEI model '{}' is not a sequence classifier",
                    info.model_id
                ))
            })?;

        let unknown: Vec<&str> = id2label
            .values()
            .filter_map(serde_json::Value::as_str)
            .filter(|label| SentimentLabel::from_model_label(label).is_none())
            .collect();
        if id2label.is_empty() || !unknown.is_empty() {
            return Err(SentimentError::ModelInitialization(format!(
                "TEI model '{}' has non-sentiment labels: [{}]",
                info.model_id,
                unknown.join(", ")
            )));
        }

        tracing::info!(
            model = %info.model_id,
            labels = id2label.len(),
            "TEI classifier available"
        );

        Ok(Arc::new(TeiModel {
            client: self.client.clone(),
            predict_url: format!("{}/predict", self.base_url),
        }))
    }
}

/// A TEI-served classifier.
#[derive(Debug, Clone)]
pub struct TeiModel {
    client: reqwest::Client,
    predict_url: String,
}

#[async_trait]
impl SentenceModel for TeiModel {
    async fn classify(&self, text: &str) -> Result<Classification, SentimentError> {
        let response = self
            .client
            .post(&self.predict_url)
            .json(&PredictRequest { inputs: text })
            .send()
            .await
            .map_err(|e| SentimentError::Classification(format!("TEI request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::Classification(format!(
                "TEI returned status {}",
                response.status()
            )));
        }

        let predictions: Vec<Prediction> = response.json().await.map_err(|e| {
            SentimentError::Classification(format!("TEI response parse error: {e}"))
        })?;

        let best = predictions
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| SentimentError::Classification("TEI returned no labels".to_string()))?;

        let label = SentimentLabel::from_model_label(&best.label).ok_or_else(|| {
            SentimentError::Classification(format!("unrecognized label '{}'", best.label))
        })?;

        Ok(Classification {
            label,
            score: best.score.clamp(0.0, 1.0),
        })
    }
}
