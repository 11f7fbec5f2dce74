//! Integration tests for newsletter signups.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn new_signup_is_201_and_repeat_is_200() {
    let harness = TestHarness::new().await;

    let first = harness
        .post_json("/api/newsletter", json!({ "email": "Reader@Example.com" }), None)
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.json(), json!({ "subscribed": true }));

    let again = harness
        .post_json("/api/newsletter", json!({ "email": "reader@example.com" }), None)
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.json(), json!({ "subscribed": false }));
}

#[tokio::test]
async fn invalid_email_is_422() {
    let harness = TestHarness::new().await;

    let response = harness
        .post_json("/api/newsletter", json!({ "email": "not-an-email" }), None)
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json()["error"], "Please enter a valid email address");
}
