//! Core domain types shared by every crate in the workspace.
//!
//! The whole system trades in two shapes: `Genre`, the closed set of movie
//! categories the emotion mapping can produce, and `MovieRecord`, the
//! normalized movie suggestion returned to the caller. Both data sources
//! (remote API and local catalog) populate the same `MovieRecord` fields so
//! downstream consumers never need to know where a record came from.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Genre
// =============================================================================

/// Movie genres known to the recommender.
///
/// Covers every genre the emotion→genre mapping can emit and every genre
/// tag the bundled catalog uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Drama,
    Family,
    Fantasy,
    Horror,
    Musical,
    Mystery,
    Romance,
    SciFi,
    Thriller,
}

impl Genre {
    /// Canonical display name, matching what movie APIs and catalog files use
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Biography => "Biography",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Family => "Family",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Musical => "Musical",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
        }
    }

    /// Parse a genre name as it appears in catalog files and API responses.
    ///
    /// Case-insensitive; accepts a few common aliases ("Science Fiction",
    /// "Kids"). Returns `None` for anything unrecognized so callers can
    /// decide whether that is an error (catalog validation) or not
    /// (skipping an exotic genre tag in an API response).
    pub fn from_name(s: &str) -> Option<Genre> {
        match s.trim().to_lowercase().as_str() {
            "action" => Some(Genre::Action),
            "adventure" => Some(Genre::Adventure),
            "animation" | "animated" => Some(Genre::Animation),
            "biography" => Some(Genre::Biography),
            "comedy" => Some(Genre::Comedy),
            "drama" => Some(Genre::Drama),
            "family" | "kids" | "children" | "children's" => Some(Genre::Family),
            "fantasy" => Some(Genre::Fantasy),
            "horror" => Some(Genre::Horror),
            "musical" | "music" => Some(Genre::Musical),
            "mystery" => Some(Genre::Mystery),
            "romance" => Some(Genre::Romance),
            "sci-fi" | "scifi" | "science fiction" => Some(Genre::SciFi),
            "thriller" => Some(Genre::Thriller),
            _ => None,
        }
    }

    /// Every genre, in alphabetical order
    pub fn all() -> &'static [Genre] {
        &[
            Genre::Action,
            Genre::Adventure,
            Genre::Animation,
            Genre::Biography,
            Genre::Comedy,
            Genre::Drama,
            Genre::Family,
            Genre::Fantasy,
            Genre::Horror,
            Genre::Musical,
            Genre::Mystery,
            Genre::Romance,
            Genre::SciFi,
            Genre::Thriller,
        ]
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// MovieRecord
// =============================================================================

/// A single movie suggestion, shaped the same no matter which source
/// produced it.
///
/// The enrichment fields (director, plot, poster, rating) are filled in
/// only when the remote provider's detail lookup succeeds; the local
/// catalog leaves them empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    /// Release year when known; rendered as "unknown" otherwise
    pub year: Option<u16>,
    /// Detail page URL for the movie
    pub link: String,
    /// Genre this record was fetched under; on dedup the first fetch wins
    /// and keeps its tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
}

impl MovieRecord {
    /// Create a bare record with no genre tag or enrichment
    pub fn new(title: impl Into<String>, year: Option<u16>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year,
            link: link.into(),
            genre: None,
            director: None,
            plot: None,
            poster: None,
            imdb_rating: None,
        }
    }

    /// Tag the record with the genre it was fetched under
    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = Some(genre);
        self
    }

    /// Year as display text, "unknown" when absent
    pub fn year_label(&self) -> String {
        match self.year {
            Some(year) => year.to_string(),
            None => "unknown".to_string(),
        }
    }

    /// Deduplication key: (title, year).
    ///
    /// Title is lowercased so the same film reported with different casing
    /// by two sources still counts as one record.
    pub fn dedup_key(&self) -> (String, Option<u16>) {
        (self.title.trim().to_lowercase(), self.year)
    }
}
