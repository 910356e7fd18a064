//! Local fallback catalog: load, validate, index.
//!
//! The catalog is the safety net of the whole system. When the remote
//! provider times out or rate-limits, every remaining lookup is answered
//! from here, so the catalog is parsed and validated once at startup and
//! never mutated afterwards.
//!
//! ## Lookup surfaces
//! 1. `by_genre` - records tagged with a genre, in catalog order
//! 2. `trending` - the fixed slice of records flagged `"trending": true`
//! 3. `padding_pool` - trending records first, then the rest of the
//!    catalog, used to top up a short result

use crate::error::{CatalogError, Result};
use crate::types::{Genre, MovieRecord};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Catalog bundled into the binary so the fallback source can never be
/// missing at runtime
const DEFAULT_CATALOG: &str = include_str!("../data/default_catalog.json");

/// Raw catalog entry as it appears in the JSON file
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    title: String,
    genre: String,
    link: String,
    #[serde(default)]
    year: Option<u16>,
    #[serde(default)]
    trending: bool,
}

/// Immutable, genre-indexed collection of fallback movies
#[derive(Debug)]
pub struct MovieCatalog {
    records: Vec<MovieRecord>,
    genre_index: HashMap<Genre, Vec<usize>>,
    trending: Vec<usize>,
}

impl MovieCatalog {
    /// Parse and validate a catalog from a JSON document.
    ///
    /// Every record is checked before indexing; a single bad record fails
    /// the whole load.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        if entries.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut records = Vec::with_capacity(entries.len());
        let mut genre_index: HashMap<Genre, Vec<usize>> = HashMap::new();
        let mut trending = Vec::new();

        for (idx, entry) in entries.into_iter().enumerate() {
            let genre = validate_entry(idx, &entry)?;

            let slot = records.len();
            genre_index.entry(genre).or_default().push(slot);
            if entry.trending {
                trending.push(slot);
            }
            records.push(MovieRecord::new(entry.title, entry.year, entry.link).with_genre(genre));
        }

        debug!(
            "Indexed {} catalog records across {} genres ({} trending)",
            records.len(),
            genre_index.len(),
            trending.len()
        );

        Ok(Self {
            records,
            genre_index,
            trending,
        })
    }

    /// Load and validate a catalog file from disk
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CatalogError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            "Loaded {} catalog records from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// The catalog bundled with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(DEFAULT_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records tagged with a genre, in catalog order
    pub fn by_genre(&self, genre: Genre) -> Vec<&MovieRecord> {
        self.genre_index
            .get(&genre)
            .map(|slots| slots.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// The fixed trending slice, in catalog order
    pub fn trending(&self) -> Vec<&MovieRecord> {
        self.trending.iter().map(|&i| &self.records[i]).collect()
    }

    /// Pool used to pad a short result: trending records first, then every
    /// remaining record in catalog order. Contains each record once.
    pub fn padding_pool(&self) -> Vec<&MovieRecord> {
        let mut pool: Vec<&MovieRecord> = self.trending();
        for (idx, record) in self.records.iter().enumerate() {
            if !self.trending.contains(&idx) {
                pool.push(record);
            }
        }
        pool
    }
}

/// Check one raw entry, returning its parsed genre tag
fn validate_entry(index: usize, entry: &CatalogEntry) -> Result<Genre> {
    if entry.title.trim().is_empty() {
        return Err(CatalogError::InvalidRecord {
            index,
            field: "title".to_string(),
            reason: "is empty".to_string(),
        });
    }
    if entry.link.trim().is_empty() {
        return Err(CatalogError::InvalidRecord {
            index,
            field: "link".to_string(),
            reason: "is empty".to_string(),
        });
    }
    if let Some(year) = entry.year {
        if !(1880..=2100).contains(&year) {
            return Err(CatalogError::InvalidRecord {
                index,
                field: "year".to_string(),
                reason: format!("{} out of range", year),
            });
        }
    }
    Genre::from_name(&entry.genre).ok_or_else(|| CatalogError::UnknownGenre {
        index,
        value: entry.genre.clone(),
    })
}
