//! Integration tests for `PlacesClient` request shapes and response decoding.

mod common;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leadscout_places::client::DETAILS_FIELDS;
use leadscout_places::PlacesError;

use common::{details_ok, hit, search_page, test_client, TEST_KEY};

#[tokio::test]
async fn text_search_decodes_hits_and_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", "dentist chicago"))
        .and(query_param("key", TEST_KEY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_page(vec![hit("p1", "Smile Co")], Some("NEXT"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client
        .text_search("dentist chicago", None)
        .await
        .expect("should parse search page");

    assert_eq!(page.status, "OK");
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].id(), Some("p1"));
    assert_eq!(page.results[0].types, vec!["cafe", "point_of_interest"]);
    assert_eq!(page.next_page_token.as_deref(), Some("NEXT"));
}

#[tokio::test]
async fn text_search_sends_page_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("pagetoken", "CURSOR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client
        .text_search("dentist chicago", Some("CURSOR"))
        .await
        .expect("should parse search page");

    assert!(page.results.is_empty());
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn place_details_requests_fixed_field_mask() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "p1"))
        .and(query_param("fields", DETAILS_FIELDS))
        .and(query_param("key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(details_ok("p1", "Smile Co")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .place_details("p1")
        .await
        .expect("should parse details");

    assert_eq!(response.status, "OK");
    let details = response.result.expect("result body");
    assert_eq!(details.name.as_deref(), Some("Smile Co"));
    assert_eq!(details.formatted_phone_number.as_deref(), Some("(617) 555-0100"));
    assert_eq!(details.photos[0].photo_reference, "photo-p1");
    assert_eq!(
        details.opening_hours.map(|h| h.weekday_text.len()),
        Some(1)
    );
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .place_details("p1")
        .await
        .expect_err("html body should not parse");

    assert!(
        matches!(err, PlacesError::Deserialize { ref context, .. } if context == "details"),
        "expected Deserialize, got {err:?}"
    );
}

#[tokio::test]
async fn fetch_photo_returns_bytes_and_content_type() {
    let server = MockServer::start().await;
    let image = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    Mock::given(method("GET"))
        .and(path("/photo"))
        .and(query_param("photo_reference", "ref-1"))
        .and(query_param("maxwidth", "400"))
        .and(query_param("key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_raw(image.clone(), "image/jpeg"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let url = client.photo_url("ref-1");
    let photo = client.fetch_photo(&url).await.expect("photo should download");

    assert_eq!(photo.bytes, image);
    assert_eq!(photo.content_type.as_deref(), Some("image/jpeg"));
}

#[tokio::test]
async fn fetch_photo_rejects_foreign_urls_without_requesting() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let foreign = format!("{}/details/json?place_id=p1", server.uri());
    let err = client
        .fetch_photo(&foreign)
        .await
        .expect_err("non-photo URL should be rejected");

    assert!(matches!(err, PlacesError::ForeignPhotoUrl(_)));
}

#[tokio::test]
async fn fetch_photo_maps_upstream_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photo"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .fetch_photo(&client.photo_url("missing"))
        .await
        .expect_err("404 should fail");

    assert!(matches!(
        err,
        PlacesError::UnexpectedStatus { status: 404, ref endpoint } if endpoint == "photo"
    ));
}
