//! Emotion classification client for a hosted inference service.
//!
//! This crate provides a small HTTP client for a hosted text-classification
//! model, plus the label vocabulary the rest of the workspace shares. It
//! handles:
//! - Request construction and bearer authentication
//! - Decoding the scored-candidate list and picking the top label
//! - Folding raw model labels into the closed EmotionLabel set
//! - Timeouts and error classification

pub mod labels;

pub use labels::{ClassificationResult, ConfidenceLevel, EmotionLabel};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur when talking to the classifier service.
///
/// The orchestrator treats every one of these as "classifier unavailable"
/// and substitutes the neutral fallback; the distinction only matters for
/// logs.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Classification request timed out")]
    Timeout,

    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid response from classifier: {0}")]
    InvalidResponse(String),
}

/// Default bound on a single classification request
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body for the inference endpoint
#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

/// One scored label candidate from the model
#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// Inference endpoints disagree on nesting: some return a flat candidate
/// list, some wrap one more array around it per input
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassifyResponse {
    fn into_candidates(self) -> Vec<LabelScore> {
        match self {
            ClassifyResponse::Nested(mut outer) => {
                if outer.is_empty() {
                    Vec::new()
                } else {
                    outer.swap_remove(0)
                }
            }
            ClassifyResponse::Flat(candidates) => candidates,
        }
    }
}

/// Client for the hosted emotion classification service.
///
/// Holds a single reqwest client with the timeout baked in, so every
/// `classify` call is bounded without per-call configuration.
pub struct EmotionClient {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl EmotionClient {
    /// Build a client for the given inference endpoint.
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the classification endpoint
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Build a client with an explicit request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        info!("Using emotion classifier at {}", endpoint);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Building HTTP client for classifier")?;

        Ok(Self {
            client,
            endpoint,
            api_token: None,
        })
    }

    /// Attach a bearer token for authenticated endpoints
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Classify a mood description into an emotion label and confidence.
    ///
    /// Empty input short-circuits to the neutral fallback without a
    /// network call, since there is nothing to classify.
    pub async fn classify(
        &self,
        text: &str,
    ) -> std::result::Result<ClassificationResult, ClassifierError> {
        if text.trim().is_empty() {
            debug!("Empty mood text, skipping classifier call");
            return Ok(ClassificationResult::fallback());
        }

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { inputs: text });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout
            } else {
                ClassifierError::Unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Classifier returned HTTP {}: {}", status, body);
            return Err(ClassifierError::Unavailable(format!("HTTP {}", status)));
        }

        let decoded: ClassifyResponse = response.json().await.map_err(|e| {
            ClassifierError::InvalidResponse(format!("Failed to parse classifier response: {}", e))
        })?;

        let top = decoded
            .into_candidates()
            .into_iter()
            .max_by(|a, b| {
                a.score
                    .partial_cmp(&b.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or_else(|| {
                ClassifierError::InvalidResponse("Classifier returned no candidates".to_string())
            })?;

        let label = EmotionLabel::normalize(&top.label);
        debug!(
            "Classified as {} (raw label {:?}, score {:.3})",
            label, top.label, top.score
        );

        Ok(ClassificationResult::new(label, top.score))
    }

    /// Endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
