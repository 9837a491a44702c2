//! Text search pagination driven by `next_page_token`.
//!
//! Pages are fetched strictly in order: a continuation token is single-use
//! and only becomes valid a short while after the page that issued it, so
//! every continuation request is preceded by [`PAGE_TOKEN_DELAY`].
//!
//! Failure policy is asymmetric. A failure before any hit has been
//! accumulated fails the whole search; a failure after that ends
//! pagination and the hits gathered so far are returned.

use std::time::Duration;

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::types::{RawHit, TextSearchResponse, STATUS_OK, STATUS_ZERO_RESULTS};

/// Maximum number of text search requests issued for a single query.
pub const MAX_PAGES: usize = 3;

/// Wait before requesting a continuation page.
pub const PAGE_TOKEN_DELAY: Duration = Duration::from_secs(2);

/// Collects raw hits for `query`, following continuation tokens for at most
/// [`MAX_PAGES`] pages.
///
/// Returns an empty `Vec` when the provider reports `ZERO_RESULTS` for the
/// first page. Hits without a `place_id` are kept.
///
/// # Errors
///
/// Only when nothing has been accumulated yet:
/// - [`PlacesError::Provider`] if the provider answered with an error status.
/// - Any transport error from [`PlacesClient::text_search`].
pub async fn collect_raw_hits(
    client: &PlacesClient,
    query: &str,
) -> Result<Vec<RawHit>, PlacesError> {
    let mut hits: Vec<RawHit> = Vec::new();
    let mut page_token: Option<String> = None;

    for page in 1..=MAX_PAGES {
        if page_token.is_some() && !client.page_delay().is_zero() {
            tokio::time::sleep(client.page_delay()).await;
        }

        let response = match client.text_search(query, page_token.as_deref()).await {
            Ok(response) => response,
            Err(err) if hits.is_empty() => return Err(err),
            Err(err) => {
                tracing::warn!(
                    query,
                    page,
                    accumulated = hits.len(),
                    error = %err,
                    "text search page failed; returning partial results"
                );
                break;
            }
        };

        match response.status.as_str() {
            STATUS_OK => {}
            STATUS_ZERO_RESULTS if page == 1 => {
                tracing::info!(query, "text search returned zero results");
                return Ok(Vec::new());
            }
            STATUS_ZERO_RESULTS => {
                tracing::debug!(query, page, "continuation page returned zero results");
                break;
            }
            _ => {
                let err = provider_error(response);
                if hits.is_empty() {
                    return Err(err);
                }
                tracing::warn!(
                    query,
                    page,
                    accumulated = hits.len(),
                    error = %err,
                    "text search page rejected by provider; returning partial results"
                );
                break;
            }
        }

        tracing::debug!(query, page, hits = response.results.len(), "text search page received");
        hits.extend(response.results);

        page_token = response.next_page_token.filter(|t| !t.is_empty());
        if page_token.is_none() {
            break;
        }
        if page == MAX_PAGES {
            tracing::debug!(query, "page cap reached; ignoring remaining continuation token");
        }
    }

    Ok(hits)
}

fn provider_error(response: TextSearchResponse) -> PlacesError {
    PlacesError::Provider {
        message: response
            .error_message
            .unwrap_or_else(|| "no error message".to_owned()),
        status: response.status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_carries_status_and_message() {
        let response = TextSearchResponse {
            status: "REQUEST_DENIED".to_owned(),
            results: Vec::new(),
            next_page_token: None,
            error_message: Some("The provided API key is invalid.".to_owned()),
        };
        match provider_error(response) {
            PlacesError::Provider { status, message } => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message, "The provided API key is invalid.");
            }
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn provider_error_without_message_uses_placeholder() {
        let response = TextSearchResponse {
            status: "UNKNOWN_ERROR".to_owned(),
            results: Vec::new(),
            next_page_token: None,
            error_message: None,
        };
        assert!(matches!(
            provider_error(response),
            PlacesError::Provider { ref message, .. } if message == "no error message"
        ));
    }

    #[test]
    fn page_policy_constants() {
        assert_eq!(MAX_PAGES, 3);
        assert_eq!(PAGE_TOKEN_DELAY, Duration::from_secs(2));
    }
}
