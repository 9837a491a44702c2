//! Google Places Web Service response types and the merged result shape.
//!
//! Every Places response carries a top-level `"status"` string. `OK` and
//! `ZERO_RESULTS` are the only non-error values; anything else
//! (`INVALID_REQUEST`, `OVER_QUERY_LIMIT`, `REQUEST_DENIED`, `NOT_FOUND`,
//! `UNKNOWN_ERROR`) may come with a human-readable `error_message`.
//!
//! All fields below the envelope are optional on the wire. Text search hits
//! in particular are observed without `place_id` on occasion, so nothing in
//! [`RawHit`] is required.

use serde::{Deserialize, Serialize};

pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

// ---------------------------------------------------------------------------
// textsearch/json
// ---------------------------------------------------------------------------

/// One page of results from the text search endpoint.
#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<RawHit>,
    /// Continuation token. Only valid a short while after it is issued,
    /// which is why the pagination driver waits before using it.
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A single business as returned by text search, before enrichment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHit {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub business_status: Option<String>,
}

impl RawHit {
    /// The place identifier, treating an empty string as absent.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.place_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// details/json
// ---------------------------------------------------------------------------

/// Envelope for the place details endpoint: `{ "status": ..., "result": {...} }`.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Place details restricted to the field mask the client requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub business_status: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    /// Canonical Google Maps URL for the place.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    /// Human-readable lines, e.g. `"Monday: 7:00 AM – 6:00 PM"`.
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacePhoto {
    pub photo_reference: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

// ---------------------------------------------------------------------------
// Merged output
// ---------------------------------------------------------------------------

/// A search hit merged with whatever the details endpoint returned for it.
///
/// `name` is always populated. `place_id` is populated for every hit that
/// carried one, including hits whose details fetch failed. `error` is set
/// when the record is partial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedResult {
    pub place_id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    /// Fetchable photo reference, resolvable through the photo relay.
    pub photo_url: Option<String>,
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub business_status: Option<String>,
    pub opening_hours: Vec<String>,
    pub maps_url: Option<String>,
    pub error: Option<String>,
}

impl EnrichedResult {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.error.is_some()
    }
}
