//! # Recommendation Engine
//!
//! Turns one classified mood into a short list of movies:
//! 1. Gate on confidence: below the threshold the label is treated as
//!    noise and the trending query is used instead
//! 2. Resolve the emotion to its ordered genre list
//! 3. Query the remote source genre by genre, deduplicating as records
//!    arrive, until enough distinct movies are collected
//! 4. On a remote failure, retry once, then serve the remaining genres
//!    from the fallback source
//! 5. Pad any shortfall from the padding pool and mark the response
//!    partial when even that cannot reach the target
//!
//! ## Example Usage
//!
//! ```ignore
//! let catalog = Arc::new(MovieCatalog::builtin()?);
//! let local = Arc::new(LocalSource::new(catalog.clone()));
//! let padding = local.padding_records();
//!
//! let engine = RecommendationEngine::new(
//!     Arc::new(OmdbSource::new(api_key)),
//!     local,
//!     EmotionGenreMap::default(),
//! )?
//! .with_padding_pool(padding);
//!
//! let result = engine
//!     .recommend(ClassificationResult::new(EmotionLabel::Joy, 0.92))
//!     .await;
//! ```

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use emotion_client::{ClassificationResult, ConfidenceLevel, EmotionLabel};
use movie_data::MovieRecord;
use sources::{GenreQuery, MovieSource, SourceError};

use crate::mapping::{ConfigurationError, EmotionGenreMap};
use crate::retry::lookup_with_retry;

/// How many distinct movies a response aims for
pub const DEFAULT_MIN_RESULTS: usize = 3;

/// Confidence below this means the mood is unclear
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.4;

/// Pause before the single retry of a failed remote lookup
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Final response for one classified mood
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    pub emotion: EmotionLabel,
    pub confidence: f32,
    pub confidence_level: ConfidenceLevel,
    /// The classifier was too unsure, so trending was shown instead of
    /// the mapped genres
    pub low_confidence: bool,
    /// Fewer movies than requested even after padding
    pub partial: bool,
    pub movies: Vec<MovieRecord>,
}

/// Decides which movies to return for one classification.
///
/// Both providers sit behind [`MovieSource`], so the selection logic never
/// cares which is the HTTP provider and which is the bundled catalog. The
/// one place the roles differ is the switch to `fallback` after the remote
/// has burned its retry.
pub struct RecommendationEngine {
    remote: Arc<dyn MovieSource>,
    fallback: Arc<dyn MovieSource>,
    padding: Vec<MovieRecord>,
    mapping: EmotionGenreMap,
    min_results: usize,
    confidence_threshold: f32,
    retry_backoff: Duration,
}

impl RecommendationEngine {
    /// Build an engine over a remote and a fallback source.
    ///
    /// The mapping is validated here: a label without genres must stop
    /// startup, not surface on the first request that hits it.
    pub fn new(
        remote: Arc<dyn MovieSource>,
        fallback: Arc<dyn MovieSource>,
        mapping: EmotionGenreMap,
    ) -> Result<Self, ConfigurationError> {
        mapping.validate()?;
        Ok(Self {
            remote,
            fallback,
            padding: Vec::new(),
            mapping,
            min_results: DEFAULT_MIN_RESULTS,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        })
    }

    /// Records used to top up a short response, tried in the given order.
    pub fn with_padding_pool(mut self, padding: Vec<MovieRecord>) -> Self {
        self.padding = padding;
        self
    }

    /// Target number of distinct movies per response.
    pub fn with_min_results(mut self, min_results: usize) -> Self {
        self.min_results = min_results.max(1);
        self
    }

    /// Confidence below which the mood is ignored in favor of trending.
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Pause before the single retry of a failed remote lookup.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Produce recommendations for one classified mood.
    ///
    /// Source trouble is absorbed here. The worst possible outcome is a
    /// response with fewer movies than requested and `partial` set, never
    /// an error.
    #[instrument(skip(self))]
    pub async fn recommend(&self, classification: ClassificationResult) -> RecommendationResult {
        // Step 1: confidence gate. An unsure classifier means the label
        // is noise, so the mapped genres are skipped entirely.
        let low_confidence = classification.confidence < self.confidence_threshold;
        let queries: Vec<GenreQuery> = if low_confidence {
            info!(
                "Confidence {:.2} below threshold {:.2}, switching to trending",
                classification.confidence, self.confidence_threshold
            );
            vec![GenreQuery::Trending]
        } else {
            self.mapping.queries_for(classification.label).to_vec()
        };

        // Step 2: remote pass, genre by genre in mapping order
        let mut picked: Vec<MovieRecord> = Vec::new();
        let mut seen: HashSet<(String, Option<u16>)> = HashSet::new();
        let mut unserved: Vec<GenreQuery> = Vec::new();
        let mut remote_down = false;

        for &query in &queries {
            if picked.len() >= self.min_results {
                break;
            }
            if remote_down {
                unserved.push(query);
                continue;
            }
            match lookup_with_retry(self.remote.as_ref(), query, self.retry_backoff).await {
                Ok(records) => {
                    let added = absorb(&mut picked, &mut seen, records, self.min_results);
                    debug!(
                        "{} contributed {} new movies for {}",
                        self.remote.name(),
                        added,
                        query
                    );
                }
                Err(SourceError::NotFound { .. }) => {
                    // The provider answered and has nothing for this
                    // genre, so the genre contributes zero movies
                    debug!("{} has nothing for {}", self.remote.name(), query);
                }
                Err(err) => {
                    warn!(
                        "{} failed for {} even after a retry ({}), serving remaining genres from {}",
                        self.remote.name(),
                        query,
                        err,
                        self.fallback.name()
                    );
                    remote_down = true;
                    unserved.push(query);
                }
            }
        }

        // Step 3: fallback pass for the genres the remote never served.
        // Whatever the remote did deliver stays at the front of the list.
        for &query in &unserved {
            if picked.len() >= self.min_results {
                break;
            }
            match self.fallback.lookup(query).await {
                Ok(records) => {
                    let added = absorb(&mut picked, &mut seen, records, self.min_results);
                    debug!(
                        "{} contributed {} new movies for {}",
                        self.fallback.name(),
                        added,
                        query
                    );
                }
                Err(err) => {
                    warn!("{} failed for {} ({})", self.fallback.name(), query, err);
                }
            }
        }

        // Step 4: pad a shortfall from the pool, genre match no longer
        // required
        if picked.len() < self.min_results && !self.padding.is_empty() {
            let added = absorb(&mut picked, &mut seen, self.padding.clone(), self.min_results);
            debug!("Padded {} movies from the pool", added);
        }

        // Step 5: a shortfall that survives padding is reported, not hidden
        let partial = picked.len() < self.min_results;
        if partial {
            warn!(
                "Only {} of {} movies found for {}",
                picked.len(),
                self.min_results,
                classification.label
            );
        }

        info!(
            "Selected {} movies for {} (confidence {:.2}, partial: {})",
            picked.len(),
            classification.label,
            classification.confidence,
            partial
        );

        RecommendationResult {
            emotion: classification.label,
            confidence: classification.confidence,
            confidence_level: classification.confidence_level(),
            low_confidence,
            partial,
            movies: picked,
        }
    }
}

/// Append records that have not been seen yet, stopping at `cap` picks.
///
/// The first record for a (title, year) pair wins, so a movie keeps the
/// genre tag of the genre that found it first.
fn absorb(
    picked: &mut Vec<MovieRecord>,
    seen: &mut HashSet<(String, Option<u16>)>,
    records: Vec<MovieRecord>,
    cap: usize,
) -> usize {
    let mut added = 0;
    for record in records {
        if picked.len() >= cap {
            break;
        }
        if seen.insert(record.dedup_key()) {
            picked.push(record);
            added += 1;
        }
    }
    added
}
