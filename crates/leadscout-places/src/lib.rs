//! Google Places search aggregation: paginated text search followed by
//! per-result detail enrichment.

pub mod client;
pub mod enrich;
pub mod error;
pub mod pagination;
pub mod search;
pub mod types;

pub use client::{PhotoPayload, PlacesClient, PlacesConfig};
pub use enrich::enrich_hits;
pub use error::PlacesError;
pub use pagination::{collect_raw_hits, MAX_PAGES, PAGE_TOKEN_DELAY};
pub use search::{search_places, SearchOutcome};
pub use types::{EnrichedResult, PlaceDetails, RawHit};
