//! The capability seam between the engine and its data sources.

use crate::types::{GenreQuery, Result};
use async_trait::async_trait;
use movie_data::MovieRecord;

/// A place movies can be looked up by genre.
///
/// Two implementations exist, the remote OMDb client and the local
/// catalog. The engine is polymorphic over this trait and only tells the
/// two apart at the fallback switch-over, never by inspecting types.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Short name for logs and result attribution
    fn name(&self) -> &str;

    /// Fetch records for one genre (or the trending set), in provider
    /// order. An empty match is `SourceError::NotFound`, never `Ok(vec![])`.
    async fn lookup(&self, query: GenreQuery) -> Result<Vec<MovieRecord>>;
}
