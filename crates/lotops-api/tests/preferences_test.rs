//! Dealer preferences integration tests.
//!
//! Run with: `cargo test -p lotops-api --test preferences_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use serde_json::{json, Value};

use helpers::fixtures::create_dealer;
use helpers::{api_path, setup_test_app};

#[tokio::test]
async fn test_preference_upsert_round_trip() {
    let app = setup_test_app().await;
    let client = app.client();
    let dealer_id = create_dealer(client, "Preferences Motors").await;
    let path = api_path(&format!("/dealers/{}/preferences/inventory_sort", dealer_id));

    // Unset keys are 404; the client falls back to its defaults.
    let response = client.get(&path).await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");

    let response = client.put(&path).json(&json!({ "value": "aged" })).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["key"], "inventory_sort");
    assert_eq!(body["value"], "aged");

    let response = client.get(&path).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["value"], "aged");

    // Setting the same key again overwrites.
    let response = client.put(&path).json(&json!({ "value": "price" })).await;
    assert_eq!(response.status_code(), 200);

    let response = client.get(&path).await;
    let body: Value = response.json();
    assert_eq!(body["value"], "price");
}

#[tokio::test]
async fn test_preferences_are_scoped_per_dealer() {
    let app = setup_test_app().await;
    let client = app.client();
    let first = create_dealer(client, "First Motors").await;
    let second = create_dealer(client, "Second Motors").await;

    let response = client
        .put(&api_path(&format!("/dealers/{}/preferences/theme", first)))
        .json(&json!({ "value": "dark" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let response = client
        .get(&api_path(&format!("/dealers/{}/preferences/theme", second)))
        .await;
    assert_eq!(response.status_code(), 404);
}
