//! Catalog-backed movie source.
//!
//! Wraps the validated [`MovieCatalog`] behind the same `MovieSource`
//! contract the remote client implements, so the engine can switch over
//! during an outage without caring which implementation it holds.

use crate::traits::MovieSource;
use crate::types::{GenreQuery, Result, SourceError};
use async_trait::async_trait;
use movie_data::{MovieCatalog, MovieRecord};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Fallback source answering lookups from the in-memory catalog
pub struct LocalSource {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<MovieCatalog>,
}

impl LocalSource {
    pub fn new(catalog: Arc<MovieCatalog>) -> Self {
        Self { catalog }
    }

    /// Records for topping up a short result: trending first, then the
    /// rest of the catalog, in catalog order
    pub fn padding_records(&self) -> Vec<MovieRecord> {
        self.catalog
            .padding_pool()
            .into_iter()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MovieSource for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    #[instrument(skip(self))]
    async fn lookup(&self, query: GenreQuery) -> Result<Vec<MovieRecord>> {
        let records: Vec<MovieRecord> = match query {
            GenreQuery::Genre(genre) => {
                self.catalog.by_genre(genre).into_iter().cloned().collect()
            }
            GenreQuery::Trending => self.catalog.trending().into_iter().cloned().collect(),
        };

        if records.is_empty() {
            return Err(SourceError::NotFound {
                query: query.to_string(),
            });
        }

        debug!("Catalog returned {} records for {}", records.len(), query);
        Ok(records)
    }
}
