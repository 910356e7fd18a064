//! Emotion to genre mapping.
//!
//! Every emotion the classifier can emit resolves to an ordered list of
//! genre queries. Order matters: the engine consults genres left to right
//! and stops once it has enough movies, so the first genre in a list is
//! the one a mood is mostly served from.

use std::collections::HashMap;

use thiserror::Error;

use emotion_client::EmotionLabel;
use movie_data::Genre;
use sources::GenreQuery;

/// A mapping hole that should stop startup
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// An emotion the classifier can emit has no genre list at all
    #[error("No genre mapping configured for emotion '{label}'")]
    MissingEmotion { label: EmotionLabel },

    /// An emotion is mapped, but to zero genres
    #[error("Genre mapping for emotion '{label}' is empty")]
    EmptyGenreSet { label: EmotionLabel },
}

/// Ordered genre preferences per emotion.
///
/// `Default` carries the built-in table; `empty` plus the `with_*`
/// builders cover fully custom tables. Either way the engine runs
/// [`EmotionGenreMap::validate`] before accepting one.
#[derive(Debug, Clone)]
pub struct EmotionGenreMap {
    map: HashMap<EmotionLabel, Vec<GenreQuery>>,
}

impl Default for EmotionGenreMap {
    /// The built-in table. Sad and fearful moods get uplifting and
    /// comforting genres rather than more of the same, and a neutral
    /// mood routes straight to the trending set.
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(
            EmotionLabel::Joy,
            queries(&[
                Genre::Comedy,
                Genre::Romance,
                Genre::Family,
                Genre::Animation,
                Genre::Musical,
            ]),
        );
        map.insert(
            EmotionLabel::Love,
            queries(&[Genre::Romance, Genre::Comedy, Genre::Family, Genre::Drama]),
        );
        map.insert(
            EmotionLabel::Sadness,
            queries(&[
                Genre::Drama,
                Genre::Animation,
                Genre::Biography,
                Genre::Romance,
            ]),
        );
        map.insert(
            EmotionLabel::Anger,
            queries(&[
                Genre::Comedy,
                Genre::Adventure,
                Genre::Action,
                Genre::Thriller,
            ]),
        );
        map.insert(
            EmotionLabel::Fear,
            queries(&[
                Genre::Family,
                Genre::Fantasy,
                Genre::Adventure,
                Genre::Animation,
            ]),
        );
        map.insert(
            EmotionLabel::Surprise,
            queries(&[
                Genre::Mystery,
                Genre::Adventure,
                Genre::Thriller,
                Genre::SciFi,
            ]),
        );
        map.insert(EmotionLabel::Neutral, vec![GenreQuery::Trending]);
        Self { map }
    }
}

impl EmotionGenreMap {
    /// A table with no entries. Useful when the whole mapping comes from
    /// configuration; `validate` will insist every label gets filled.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Replace the genre list for one emotion.
    pub fn with_genres(mut self, label: EmotionLabel, genres: Vec<Genre>) -> Self {
        self.map
            .insert(label, genres.into_iter().map(GenreQuery::from).collect());
        self
    }

    /// Route one emotion straight to the trending set.
    pub fn with_trending(mut self, label: EmotionLabel) -> Self {
        self.map.insert(label, vec![GenreQuery::Trending]);
        self
    }

    /// Ordered queries for a label. Empty only if `validate` was skipped.
    pub fn queries_for(&self, label: EmotionLabel) -> &[GenreQuery] {
        self.map.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check the table covers every emotion the classifier can emit.
    ///
    /// Runs at engine construction so a hole in the table fails startup
    /// instead of the first request that hits the missing label.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for &label in EmotionLabel::all() {
            match self.map.get(&label) {
                None => return Err(ConfigurationError::MissingEmotion { label }),
                Some(queries) if queries.is_empty() => {
                    return Err(ConfigurationError::EmptyGenreSet { label });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

fn queries(genres: &[Genre]) -> Vec<GenreQuery> {
    genres.iter().copied().map(GenreQuery::from).collect()
}
