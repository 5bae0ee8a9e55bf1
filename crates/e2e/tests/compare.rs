//! Dual-environment comparison and response decoding over the wire

mod common;

use common::{api_path, MockEnvironments};
use gamestore_common::{Cart, Environment, WishlistItemRequest};
use gamestore_e2e::{ApiRequest, DualEnvironment, E2eError, ErrorKind};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn both_outcomes_are_returned_unjudged() {
    let envs = MockEnvironments::start().await;

    Mock::given(method("POST"))
        .and(path(api_path("/users/login")))
        .and(header("x-task-id", "api-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uuid": "u-0"})))
        .expect(1)
        .mount(&envs.release)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/users/login")))
        .and(header("x-task-id", "api-7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .expect(1)
        .mount(&envs.dev)
        .await;

    let request = ApiRequest::post("/users/login")
        .json(&json!({"email": "user0@example.com", "password": "password"}))
        .unwrap();
    let pair = DualEnvironment::new(envs.client.clone())
        .compare("api-7", request)
        .await
        .unwrap();

    assert_eq!(pair.release.status(), StatusCode::OK);
    assert_eq!(pair.dev.status(), StatusCode::NOT_FOUND);
    assert_ne!(pair.statuses().release, pair.statuses().dev);
}

#[tokio::test]
async fn per_environment_bodies() {
    let envs = MockEnvironments::start().await;

    Mock::given(method("POST"))
        .and(path(api_path("/users/u-0/wishlist/add")))
        .and(body_json(json!({"item_uuid": "g-0"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"uuid": "g-0"}]})))
        .expect(1)
        .mount(&envs.release)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/users/u-0/wishlist/add")))
        .and(body_json(json!({"item_uuid": "g-1"})))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": "limit"})))
        .expect(1)
        .mount(&envs.dev)
        .await;

    let pair = DualEnvironment::new(envs.client.clone())
        .compare_with("api-5", |env| {
            let item_uuid = match env {
                Environment::Release => "g-0",
                Environment::Dev => "g-1",
            };
            ApiRequest::post("/users/u-0/wishlist/add").json(&WishlistItemRequest {
                item_uuid: item_uuid.to_string(),
            })
        })
        .await
        .unwrap();

    assert_eq!(pair.statuses().release, 200);
    assert_eq!(pair.statuses().dev, 422);

    let bodies = pair.json().unwrap();
    assert_eq!(bodies.release.uuids("items").unwrap(), vec!["g-0"]);
    assert_eq!(bodies.dev.str("message").unwrap(), "limit");
}

#[tokio::test]
async fn typed_pair_decoding() {
    let envs = MockEnvironments::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/users/u-0/cart")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"item_uuid": "g-0", "quantity": 2, "total_price": 2000}],
            "total_price": 2000,
            "user_uuid": "u-0"
        })))
        .mount(&envs.release)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/users/u-0/cart")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "total_price": 1000,
            "user_uuid": "u-0"
        })))
        .mount(&envs.dev)
        .await;

    let carts = envs
        .client
        .stores("api-12")
        .release
        .cart("u-0")
        .await
        .unwrap()
        .typed::<Cart>()
        .unwrap();
    assert!(carts.contains("g-0"));

    let pair = DualEnvironment::new(envs.client.clone())
        .compare("api-12", ApiRequest::get("/users/u-0/cart"))
        .await
        .unwrap()
        .typed::<Cart>()
        .unwrap();
    assert_ne!(pair.release.total_price, pair.dev.total_price);
    assert!(pair.dev.is_empty());
}

#[tokio::test]
async fn decode_failure_is_distinct_from_status_mismatch() {
    let envs = MockEnvironments::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/payments/p-1")))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&envs.dev)
        .await;

    let response = envs
        .client
        .store(Environment::Dev, "api-19")
        .payment("p-1")
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let mismatch = response.check_status(StatusCode::OK).unwrap_err();
    assert_eq!(mismatch.kind(), ErrorKind::Assertion);

    let decode = response.json().unwrap_err();
    assert_eq!(decode.kind(), ErrorKind::Decode);
    assert!(matches!(
        decode,
        E2eError::Decode { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
}

#[tokio::test]
async fn meta_total_is_numeric() {
    let envs = MockEnvironments::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("/users")))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"meta":{"total":11}}"#,
            "application/json",
        ))
        .mount(&envs.release)
        .await;

    let body = envs
        .client
        .store(Environment::Release, "api-21")
        .list_users(None)
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(body.f64("meta.total").unwrap(), 11.0);
    assert_eq!(body.i64("meta.total").unwrap(), 11);
    let err = gamestore_e2e::E2eError::from(body.str("meta.total").unwrap_err());
    assert_eq!(err.field(), Some("meta.total"));
}
