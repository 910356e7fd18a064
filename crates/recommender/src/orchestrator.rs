//! # Mood Orchestrator
//!
//! Ties the classifier and the engine together:
//! 1. Classify the input text
//! 2. On classifier trouble, substitute the neutral fallback classification
//! 3. Hand the classification to the engine
//!
//! The classifier is the only component on this path allowed to fail, and
//! its failure turns into the trending experience rather than an error the
//! caller has to handle.

use std::time::Instant;

use tracing::{info, warn};

use emotion_client::{ClassificationResult, EmotionClient};

use crate::engine::{RecommendationEngine, RecommendationResult};

/// Coordinates classification and recommendation for one input text
pub struct MoodOrchestrator {
    classifier: EmotionClient,
    engine: RecommendationEngine,
}

impl MoodOrchestrator {
    pub fn new(classifier: EmotionClient, engine: RecommendationEngine) -> Self {
        Self { classifier, engine }
    }

    /// Main entry point: movies for one piece of free text.
    pub async fn recommend_for_text(&self, text: &str) -> RecommendationResult {
        let start_time = Instant::now();

        let classification = match self.classifier.classify(text).await {
            Ok(classification) => classification,
            Err(err) => {
                warn!("Emotion classification failed ({}), assuming neutral", err);
                ClassificationResult::fallback()
            }
        };
        info!(
            "Classified input as {} (confidence {:.2}, {})",
            classification.label,
            classification.confidence,
            classification.confidence_level()
        );

        let result = self.engine.recommend(classification).await;
        info!(
            "Prepared {} movies in {:.2?}",
            result.movies.len(),
            start_time.elapsed()
        );
        result
    }
}
