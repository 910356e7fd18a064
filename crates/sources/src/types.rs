//! Query and error types shared by every movie source.

use movie_data::Genre;
use std::fmt;
use thiserror::Error;

/// What a lookup asks for: one concrete genre, or the trending set.
///
/// Trending is the "no genre filter" sentinel used for neutral moods and
/// anything below the confidence threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenreQuery {
    Genre(Genre),
    Trending,
}

impl GenreQuery {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenreQuery::Genre(genre) => genre.as_str(),
            GenreQuery::Trending => "trending",
        }
    }
}

impl fmt::Display for GenreQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Genre> for GenreQuery {
    fn from(genre: Genre) -> Self {
        GenreQuery::Genre(genre)
    }
}

/// Errors a movie source can signal
#[derive(Error, Debug)]
pub enum SourceError {
    /// Request exceeded its deadline
    #[error("Source request timed out")]
    Timeout,

    /// Provider asked us to back off
    #[error("Source rate limited")]
    RateLimited,

    /// The query matched nothing on the provider side
    #[error("No results for {query}")]
    NotFound { query: String },

    /// Connection refused, bad HTTP status, undecodable body
    #[error("Source unavailable: {reason}")]
    Unavailable { reason: String },
}

impl SourceError {
    /// Whether the one-retry rule applies.
    ///
    /// NotFound means the query genuinely has no results, so retrying the
    /// same query cannot help and would just burn the single retry.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SourceError::NotFound { .. })
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SourceError>;
