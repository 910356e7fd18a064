//! Error types for the movie-data crate.

use thiserror::Error;

/// Errors that can occur while loading or validating the fallback catalog.
///
/// Any of these surfacing at startup is a configuration problem the
/// operator has to fix; none of them can occur per-request because the
/// catalog is loaded and validated exactly once.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found
    #[error("Catalog file not found: {path}")]
    FileNotFound { path: String },

    /// I/O error while reading the catalog file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalog document is not valid JSON
    #[error("Failed to parse catalog JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A record failed field validation
    #[error("Invalid catalog record #{index}: {field} {reason}")]
    InvalidRecord {
        index: usize,
        field: String,
        reason: String,
    },

    /// A record names a genre the recommender does not know
    #[error("Unknown genre in catalog record #{index}: {value}")]
    UnknownGenre { index: usize, value: String },

    /// The catalog parsed but contains no records
    #[error("Catalog contains no records")]
    EmptyCatalog,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
