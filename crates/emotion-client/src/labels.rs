//! Emotion label vocabulary and classification results.
//!
//! Classification models disagree on vocabulary: some emit "happiness",
//! some "positive", some the Plutchik set with "anticipation" and "trust".
//! Everything is folded into the closed [`EmotionLabel`] set here so the
//! rest of the workspace never sees a label it has no mapping for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of emotions the recommender understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Joy,
    Love,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Neutral,
}

impl EmotionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Joy => "joy",
            EmotionLabel::Love => "love",
            EmotionLabel::Sadness => "sadness",
            EmotionLabel::Anger => "anger",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Surprise => "surprise",
            EmotionLabel::Neutral => "neutral",
        }
    }

    /// Every label the classifier can hand the engine.
    ///
    /// Mapping validation iterates this, so a new variant added here
    /// without a genre mapping fails at startup rather than at request
    /// time.
    pub fn all() -> &'static [EmotionLabel] {
        &[
            EmotionLabel::Joy,
            EmotionLabel::Love,
            EmotionLabel::Sadness,
            EmotionLabel::Anger,
            EmotionLabel::Fear,
            EmotionLabel::Surprise,
            EmotionLabel::Neutral,
        ]
    }

    /// Fold a raw model label into the closed set.
    ///
    /// Unrecognized labels land on Neutral so they take the trending path
    /// instead of committing to a wrong genre.
    pub fn normalize(raw: &str) -> EmotionLabel {
        match raw.trim().to_lowercase().as_str() {
            "joy" | "happiness" | "positive" | "trust" => EmotionLabel::Joy,
            "love" => EmotionLabel::Love,
            "sadness" | "grief" | "negative" => EmotionLabel::Sadness,
            "anger" | "rage" | "frustration" => EmotionLabel::Anger,
            "fear" | "anxiety" | "worry" => EmotionLabel::Fear,
            "surprise" | "amazement" | "anticipation" => EmotionLabel::Surprise,
            "neutral" | "disgust" => EmotionLabel::Neutral,
            _ => EmotionLabel::Neutral,
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the classifier hands the engine: a label and how sure it is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: EmotionLabel,
    /// Model confidence in [0, 1]
    pub confidence: f32,
}

impl ClassificationResult {
    pub fn new(label: EmotionLabel, confidence: f32) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Result substituted when the classifier is unavailable or the input
    /// is empty: neutral at zero confidence, which always takes the
    /// trending path
    pub fn fallback() -> Self {
        Self {
            label: EmotionLabel::Neutral,
            confidence: 0.0,
        }
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence)
    }
}

/// Coarse confidence buckets for user-facing output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    VeryLow,
}

impl ConfidenceLevel {
    pub fn from_score(score: f32) -> Self {
        if score >= 0.8 {
            ConfidenceLevel::High
        } else if score >= 0.6 {
            ConfidenceLevel::Medium
        } else if score >= 0.4 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::VeryLow => "very low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
