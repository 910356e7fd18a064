//! Single-retry wrapper for source lookups.

use std::time::Duration;

use tracing::warn;

use movie_data::MovieRecord;
use sources::{GenreQuery, MovieSource, Result};

/// Run one lookup, retrying exactly once after `backoff` when the error
/// is transient.
///
/// NotFound is returned as-is: the provider answered and the query simply
/// has no results, so a second attempt cannot change the outcome.
pub(crate) async fn lookup_with_retry(
    source: &dyn MovieSource,
    query: GenreQuery,
    backoff: Duration,
) -> Result<Vec<MovieRecord>> {
    match source.lookup(query).await {
        Ok(records) => Ok(records),
        Err(err) if err.is_retryable() => {
            warn!(
                "{} lookup for {} failed ({}), retrying once after {:?}",
                source.name(),
                query,
                err,
                backoff
            );
            tokio::time::sleep(backoff).await;
            source.lookup(query).await
        }
        Err(err) => Err(err),
    }
}
