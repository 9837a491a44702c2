//! Per-hit detail enrichment.
//!
//! Each hit is resolved independently: a missing `place_id` or a failed
//! details request downgrades only that item to a partial record, never the
//! whole batch. Details requests may overlap (bounded by
//! [`PlacesClient::details_concurrency`]) but output order always matches
//! input order.

use futures::stream::{self, StreamExt};

use crate::client::PlacesClient;
use crate::types::{EnrichedResult, PlaceDetails, RawHit, STATUS_OK};

const UNKNOWN_NAME: &str = "Unknown";
const MISSING_PLACE_ID: &str = "missing place_id";

/// Enriches every hit with place details, preserving input order.
pub async fn enrich_hits(client: &PlacesClient, hits: Vec<RawHit>) -> Vec<EnrichedResult> {
    stream::iter(hits.into_iter().map(|hit| enrich_hit(client, hit)))
        .buffered(client.details_concurrency())
        .collect()
        .await
}

async fn enrich_hit(client: &PlacesClient, hit: RawHit) -> EnrichedResult {
    let Some(place_id) = hit.id().map(str::to_owned) else {
        tracing::warn!(
            name = hit.name.as_deref().unwrap_or(UNKNOWN_NAME),
            "search hit has no place_id; skipping details"
        );
        return malformed_hit(hit);
    };

    match client.place_details(&place_id).await {
        Ok(response) if response.status == STATUS_OK => match response.result {
            Some(details) => {
                let photo_url = details
                    .photos
                    .first()
                    .map(|photo| client.photo_url(&photo.photo_reference));
                merge_details(place_id, hit, details, photo_url)
            }
            None => {
                tracing::warn!(place_id = %place_id, "details response had no result body");
                fallback_from_hit(place_id, hit, "details response missing result".to_owned())
            }
        },
        Ok(response) => {
            tracing::warn!(
                place_id = %place_id,
                status = %response.status,
                error_message = response.error_message.as_deref().unwrap_or(""),
                "details request rejected; using basic search fields"
            );
            let reason = format!("details request failed: {}", response.status);
            fallback_from_hit(place_id, hit, reason)
        }
        Err(err) => {
            tracing::warn!(place_id = %place_id, error = %err, "details request failed; using basic search fields");
            fallback_from_hit(place_id, hit, format!("details request failed: {err}"))
        }
    }
}

/// Builds a full record, preferring details fields over the search hit.
pub(crate) fn merge_details(
    place_id: String,
    hit: RawHit,
    details: PlaceDetails,
    photo_url: Option<String>,
) -> EnrichedResult {
    let types = if details.types.is_empty() {
        hit.types
    } else {
        details.types
    };

    EnrichedResult {
        place_id: Some(details.place_id.unwrap_or(place_id)),
        name: details
            .name
            .or(hit.name)
            .unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
        address: details.formatted_address.or(hit.formatted_address),
        website: details.website,
        phone: details.formatted_phone_number,
        photo_url,
        types,
        rating: details.rating.or(hit.rating),
        user_ratings_total: details.user_ratings_total.or(hit.user_ratings_total),
        business_status: details.business_status.or(hit.business_status),
        opening_hours: details
            .opening_hours
            .map(|hours| hours.weekday_text)
            .unwrap_or_default(),
        maps_url: details.url,
        error: None,
    }
}

/// Builds a partial record from the search hit alone.
pub(crate) fn fallback_from_hit(place_id: String, hit: RawHit, reason: String) -> EnrichedResult {
    EnrichedResult {
        place_id: Some(place_id),
        name: hit.name.unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
        address: hit.formatted_address,
        website: None,
        phone: None,
        photo_url: None,
        types: hit.types,
        rating: hit.rating,
        user_ratings_total: hit.user_ratings_total,
        business_status: hit.business_status,
        opening_hours: Vec::new(),
        maps_url: None,
        error: Some(reason),
    }
}

/// Builds the minimal record for a hit without an identifier: name and
/// error marker only.
pub(crate) fn malformed_hit(hit: RawHit) -> EnrichedResult {
    EnrichedResult {
        place_id: None,
        name: hit.name.unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
        address: None,
        website: None,
        phone: None,
        photo_url: None,
        types: Vec::new(),
        rating: None,
        user_ratings_total: None,
        business_status: None,
        opening_hours: Vec::new(),
        maps_url: None,
        error: Some(MISSING_PLACE_ID.to_owned()),
    }
}
