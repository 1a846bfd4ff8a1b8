//! Integration tests for `FusionClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the search endpoint, the joined
//! detail+reviews fetch, and every error variant the client can produce from
//! a live response.

use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vicinity_client::{ClientError, FusionClient};
use vicinity_core::GeoSample;

fn test_client(base: &str) -> FusionClient {
    FusionClient::with_base_url("test-key", 5, "vicinity-test/0.1", base)
        .expect("failed to build test FusionClient")
}

fn here() -> GeoSample {
    GeoSample::new(40.7128, -74.0060, Utc::now())
}

fn detail_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Joe's Pizza",
        "location": { "display_address": ["7 Carmine St", "New York, NY 10014"] },
        "url": format!("https://example.com/{id}"),
        "photos": ["https://example.com/p1.jpg"],
        "categories": [{ "title": "Pizza" }, { "title": "Italian" }],
        "review_count": 812
    })
}

fn reviews_json() -> serde_json::Value {
    json!({
        "reviews": [
            {
                "user": { "name": "Ana", "image_url": "https://example.com/ana.jpg" },
                "text": "Solid slice.",
                "rating": 4.5
            },
            {
                "user": { "name": "Bo", "image_url": "https://example.com/bo.jpg" },
                "text": "Fine.",
                "rating": 3
            }
        ]
    })
}

// ---------------------------------------------------------------------------
// search — happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_returns_ids_in_response_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "businesses": [{ "id": "b1" }, { "id": "b2" }, { "id": "b3" }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search(&here(), "pizza").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let ids: Vec<String> = result.unwrap().into_iter().map(|b| b.id).collect();
    assert_eq!(ids, vec!["b1", "b2", "b3"]);
}

#[tokio::test]
async fn search_returns_empty_vec_for_empty_business_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "businesses": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search(&here(), "").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn search_sends_bearer_auth_and_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .and(header("authorization", "Bearer test-key"))
        .and(query_param("latitude", "40.7128"))
        .and(query_param("longitude", "-74.006"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "businesses": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search(&here(), "pizza").await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn search_includes_term_when_non_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .and(query_param("term", "pizza"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "businesses": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search(&here(), "pizza").await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn search_omits_term_when_empty_or_whitespace() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .and(query_param_is_missing("term"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "businesses": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.search(&here(), "").await.is_ok());
    assert!(client.search(&here(), "   ").await.is_ok());
}

// ---------------------------------------------------------------------------
// search — error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_maps_429_to_rate_limited_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search(&here(), "pizza").await;

    match result.unwrap_err() {
        ClientError::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, 30),
        other => panic!("expected ClientError::RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn search_rate_limit_without_retry_after_defaults_to_60s() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search(&here(), "pizza").await;

    match result.unwrap_err() {
        ClientError::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, 60),
        other => panic!("expected ClientError::RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn search_maps_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search(&here(), "pizza").await;
    assert!(
        matches!(result.unwrap_err(), ClientError::NotFound { .. }),
        "expected ClientError::NotFound"
    );
}

#[tokio::test]
async fn search_maps_5xx_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search(&here(), "pizza").await;

    match result.unwrap_err() {
        ClientError::UnexpectedStatus { status, .. } => assert_eq!(status, 503),
        other => panic!("expected ClientError::UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn search_maps_malformed_body_to_deserialize() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search(&here(), "pizza").await;
    assert!(
        matches!(result.unwrap_err(), ClientError::Deserialize { .. }),
        "expected ClientError::Deserialize"
    );
}

// ---------------------------------------------------------------------------
// fetch_detail — joined detail + reviews
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_detail_joins_detail_and_reviews() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&detail_json("b1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/businesses/b1/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&reviews_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_detail("b1").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let detail = result.unwrap();
    assert_eq!(detail.id, "b1");
    assert_eq!(detail.name, "Joe's Pizza");
    assert_eq!(
        detail.address_lines,
        vec!["7 Carmine St", "New York, NY 10014"]
    );
    assert_eq!(detail.categories, vec!["Pizza", "Italian"]);
    assert_eq!(detail.review_count, 812);
    assert_eq!(detail.reviews.len(), 2);
    assert_eq!(detail.reviews[0].author_name, "Ana");
    assert_eq!(detail.reviews[0].rating, "4.5");
    // Integer wire rating still renders with one decimal.
    assert_eq!(detail.reviews[1].rating, "3.0");
}

#[tokio::test]
async fn fetch_detail_fails_when_reviews_request_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&detail_json("b1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/businesses/b1/reviews"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_detail("b1").await;

    assert!(result.is_err(), "expected Err when reviews return 500");
    assert!(
        matches!(
            result.unwrap_err(),
            ClientError::UnexpectedStatus { status: 500, .. }
        ),
        "expected UnexpectedStatus from the reviews sub-request"
    );
}

#[tokio::test]
async fn fetch_detail_fails_when_detail_request_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/b1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/businesses/b1/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&reviews_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_detail("b1").await;

    assert!(
        matches!(result.unwrap_err(), ClientError::NotFound { .. }),
        "expected NotFound from the detail sub-request"
    );
}

#[tokio::test]
async fn fetch_detail_fails_when_required_field_is_missing() {
    let server = MockServer::start().await;

    // Detail body without the required "name" field.
    let mut body = detail_json("b1");
    body.as_object_mut().unwrap().remove("name");

    Mock::given(method("GET"))
        .and(path("/businesses/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/businesses/b1/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&reviews_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_detail("b1").await;

    assert!(
        matches!(result.unwrap_err(), ClientError::Deserialize { .. }),
        "expected Deserialize for a missing required field"
    );
}

#[tokio::test]
async fn fetch_detail_fails_when_review_rating_is_wrong_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/businesses/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&detail_json("b1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/businesses/b1/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "reviews": [{
                "user": { "name": "Ana", "image_url": "https://example.com/ana.jpg" },
                "text": "Solid slice.",
                "rating": "four and a half"
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_detail("b1").await;

    assert!(
        matches!(result.unwrap_err(), ClientError::Deserialize { .. }),
        "expected Deserialize for an untyped-incompatible rating"
    );
}
