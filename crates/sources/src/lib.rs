//! # Sources Crate
//!
//! Movie lookup sources behind one capability trait.
//!
//! ## Components
//!
//! ### OMDb Source (Remote)
//! Keyword search against the OMDb API:
//! - Each genre maps to a few title keywords
//! - Hits are deduplicated by IMDb ID within a lookup
//! - Optional per-hit detail enrichment (plot, director, rating)
//!
//! ### Local Source (Fallback)
//! Answers from the validated in-memory catalog:
//! - Genre lookups in catalog order
//! - A fixed trending slice for the sentinel
//! - A padding pool for topping up short results
//!
//! ## Example Usage
//!
//! ```ignore
//! use movie_data::MovieCatalog;
//! use sources::{GenreQuery, LocalSource, MovieSource};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(MovieCatalog::builtin()?);
//! let local = LocalSource::new(catalog);
//!
//! let trending = local.lookup(GenreQuery::Trending).await?;
//! println!("{} trending picks on hand", trending.len());
//! ```

// Public modules
pub mod types;
pub mod traits;
pub mod omdb;
pub mod local;

// Re-export commonly used types
pub use types::{GenreQuery, Result, SourceError};
pub use traits::MovieSource;
pub use omdb::OmdbSource;
pub use local::LocalSource;

#[cfg(test)]
mod tests {
    use super::*;
    use movie_data::{Genre, MovieCatalog};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_both_sources_share_the_contract() {
        // The engine only ever sees trait objects; make sure both
        // implementations box up cleanly
        let catalog = Arc::new(MovieCatalog::builtin().unwrap());
        let sources: Vec<Arc<dyn MovieSource>> = vec![
            Arc::new(OmdbSource::new("test-key")),
            Arc::new(LocalSource::new(catalog)),
        ];

        assert_eq!(sources[0].name(), "omdb");
        assert_eq!(sources[1].name(), "local");

        let records = sources[1]
            .lookup(GenreQuery::Genre(Genre::Comedy))
            .await
            .unwrap();
        assert!(!records.is_empty());
    }
}
