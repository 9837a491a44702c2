//! Search aggregation entry point: validate, paginate, enrich.

use crate::client::PlacesClient;
use crate::enrich::enrich_hits;
use crate::error::PlacesError;
use crate::pagination::collect_raw_hits;
use crate::types::EnrichedResult;

/// Successful outcome of [`search_places`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The provider found nothing for the query. Not an error.
    NoResults,
    /// One record per raw hit, in provider order.
    Results(Vec<EnrichedResult>),
}

impl SearchOutcome {
    #[must_use]
    pub fn results(&self) -> &[EnrichedResult] {
        match self {
            Self::NoResults => &[],
            Self::Results(results) => results,
        }
    }

    #[must_use]
    pub fn into_results(self) -> Vec<EnrichedResult> {
        match self {
            Self::NoResults => Vec::new(),
            Self::Results(results) => results,
        }
    }
}

/// Runs a full search for `query`: up to three pages of text search hits,
/// each enriched with place details.
///
/// # Errors
///
/// - [`PlacesError::EmptyQuery`] if `query` is blank (no request is made).
/// - [`PlacesError::Provider`] or a transport error if the search failed
///   before any hit was collected. Later page failures and per-item details
///   failures are absorbed into the returned results.
pub async fn search_places(
    client: &PlacesClient,
    query: &str,
) -> Result<SearchOutcome, PlacesError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(PlacesError::EmptyQuery);
    }

    let hits = collect_raw_hits(client, query).await?;
    if hits.is_empty() {
        return Ok(SearchOutcome::NoResults);
    }

    let raw_count = hits.len();
    let results = enrich_hits(client, hits).await;
    let partial = results.iter().filter(|r| r.is_partial()).count();
    tracing::info!(query, raw_count, partial, "places search complete");

    Ok(SearchOutcome::Results(results))
}
