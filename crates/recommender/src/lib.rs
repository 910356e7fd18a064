//! Decision layer of the mood recommendation engine.
//!
//! This crate maps a classified emotion onto genres, drives the movie
//! sources with retry and fallback, and assembles the final response.

pub mod engine;
pub mod mapping;
pub mod orchestrator;

mod retry;

pub use engine::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_MIN_RESULTS, DEFAULT_RETRY_BACKOFF,
    RecommendationEngine, RecommendationResult,
};
pub use mapping::{ConfigurationError, EmotionGenreMap};
pub use orchestrator::MoodOrchestrator;
