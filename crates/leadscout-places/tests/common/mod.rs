//! Shared fixtures for the Places integration tests.

#![allow(dead_code)]

use std::time::Duration;

use leadscout_places::{PlacesClient, PlacesConfig};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_KEY: &str = "test-key";

/// Client pointed at `server` with no pacing delay and sequential details.
pub fn test_client(server: &MockServer) -> PlacesClient {
    client_with(server, Duration::ZERO, 1)
}

pub fn client_with(
    server: &MockServer,
    page_delay: Duration,
    details_concurrency: usize,
) -> PlacesClient {
    let config = PlacesConfig::new(TEST_KEY)
        .with_base_url(server.uri())
        .with_timeout_secs(5)
        .with_page_delay(page_delay)
        .with_details_concurrency(details_concurrency);
    PlacesClient::new(config).expect("client construction should not fail")
}

pub fn hit(place_id: &str, name: &str) -> Value {
    json!({
        "place_id": place_id,
        "name": name,
        "formatted_address": format!("{name} St, Boston, MA"),
        "types": ["cafe", "point_of_interest"],
        "rating": 4.2,
        "user_ratings_total": 57,
        "business_status": "OPERATIONAL"
    })
}

pub fn search_page(hits: Vec<Value>, next_page_token: Option<&str>) -> Value {
    let mut body = json!({ "status": "OK", "results": hits });
    if let Some(token) = next_page_token {
        body["next_page_token"] = json!(token);
    }
    body
}

pub fn status_body(status: &str) -> Value {
    json!({ "status": status, "results": [], "error_message": format!("{status} from mock") })
}

pub fn details_ok(place_id: &str, name: &str) -> Value {
    json!({
        "status": "OK",
        "result": {
            "place_id": place_id,
            "name": name,
            "formatted_address": format!("{name} Ave, Boston, MA 02110"),
            "website": format!("https://{place_id}.example.com"),
            "formatted_phone_number": "(617) 555-0100",
            "types": ["cafe"],
            "rating": 4.7,
            "user_ratings_total": 310,
            "business_status": "OPERATIONAL",
            "opening_hours": { "weekday_text": ["Monday: 7:00 AM – 6:00 PM"] },
            "url": format!("https://maps.google.com/?cid={place_id}"),
            "photos": [{ "photo_reference": format!("photo-{place_id}"), "width": 800, "height": 600 }]
        }
    })
}

/// Number of requests the server received on `path`.
pub async fn request_count(server: &MockServer, path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == path)
        .count()
}
