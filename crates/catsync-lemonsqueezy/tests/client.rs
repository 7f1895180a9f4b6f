//! Integration tests for `LemonSqueezyClient` using wiremock HTTP mocks.

use catsync_lemonsqueezy::{LemonSqueezyClient, LemonSqueezyError};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> LemonSqueezyClient {
    LemonSqueezyClient::with_base_url("test-key", 30, "catsync-test/0", base_url)
        .expect("client construction should not fail")
        .retry_policy(0, 0)
}

#[tokio::test]
async fn create_product_posts_a_draft_and_returns_the_id() {
    let server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "data": {
            "type": "products",
            "attributes": {
                "name": "Janus — Critical Analysis",
                "description": "Stress-tests your pitches.",
                "status": "draft"
            },
            "relationships": {
                "store": { "data": { "type": "stores", "id": "12345" } }
            }
        }
    });

    Mock::given(method("POST"))
        .and(path("/v1/products"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/vnd.api+json"))
        .and(body_partial_json(&expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": { "type": "products", "id": "777001", "attributes": {} }
        })))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()));
    let product_id = client
        .create_product(12345, "Janus — Critical Analysis", "Stress-tests your pitches.")
        .await
        .expect("create should succeed");

    assert_eq!(product_id, "777001");
}

#[tokio::test]
async fn create_product_surfaces_truncated_error_payloads() {
    let server = MockServer::start().await;

    let long_detail = "the name field is invalid ".repeat(40);
    Mock::given(method("POST"))
        .and(path("/v1/products"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "errors": [{ "status": "422", "detail": long_detail }]
            })),
        )
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()));
    let err = client
        .create_product(12345, "Bad", "Bad")
        .await
        .expect_err("422 should be an error");

    match err {
        LemonSqueezyError::Api { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("the name field is invalid"));
            assert!(body.len() <= 304, "body should be truncated, got {} bytes", body.len());
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn default_variant_id_takes_the_first_listed_variant() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/variants"))
        .and(query_param("filter[product_id]", "777001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                { "type": "variants", "id": "998877", "attributes": {} },
                { "type": "variants", "id": "998878", "attributes": {} }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()));
    let variant_id = client
        .default_variant_id("777001")
        .await
        .expect("listing should succeed");

    assert_eq!(variant_id, "998877");
}

#[tokio::test]
async fn default_variant_id_signals_a_missing_variant_distinctly() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/variants"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()));
    let err = client
        .default_variant_id("777001")
        .await
        .expect_err("empty listing should be an error");

    assert!(
        matches!(err, LemonSqueezyError::MissingVariant { ref product_id } if product_id == "777001"),
        "expected MissingVariant, got: {err:?}"
    );
}

#[tokio::test]
async fn activate_variant_patches_price_flags_and_status() {
    let server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "data": {
            "type": "variants",
            "id": "998877",
            "attributes": {
                "price": 3900,
                "is_membership": false,
                "has_free_trial": false,
                "pay_what_you_want": false,
                "status": "active"
            }
        }
    });

    Mock::given(method("PATCH"))
        .and(path("/v1/variants/998877"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "type": "variants", "id": "998877", "attributes": {} }
        })))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()));
    client
        .activate_variant("998877", 3900)
        .await
        .expect("activation should succeed");
}

#[tokio::test]
async fn rate_limited_requests_are_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/variants"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/variants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "type": "variants", "id": "5", "attributes": {} }]
        })))
        .mount(&server)
        .await;

    let client = LemonSqueezyClient::with_base_url(
        "test-key",
        30,
        "catsync-test/0",
        &format!("{}/v1", server.uri()),
    )
    .expect("client construction should not fail")
    .retry_policy(3, 0);

    let variant_id = client
        .default_variant_id("1")
        .await
        .expect("should succeed after retries");
    assert_eq!(variant_id, "5");
}

#[tokio::test]
async fn validation_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(422).set_body_string("no"))
        .expect(1)
        .mount(&server)
        .await;

    let client = LemonSqueezyClient::with_base_url(
        "test-key",
        30,
        "catsync-test/0",
        &format!("{}/v1", server.uri()),
    )
    .expect("client construction should not fail")
    .retry_policy(3, 0);

    let err = client
        .create_product(1, "n", "d")
        .await
        .expect_err("422 should fail");
    assert!(matches!(err, LemonSqueezyError::Api { status: 422, .. }));
}
