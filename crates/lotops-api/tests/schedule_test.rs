//! Schedule API integration tests.
//!
//! Run with: `cargo test -p lotops-api --test schedule_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use serde_json::{json, Value};
use uuid::Uuid;

use helpers::fixtures::create_dealer;
use helpers::{api_path, setup_test_app};

fn shift_body(employee_id: Uuid, date: &str, start: &str, end: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "shift_date": date,
        "start_time": start,
        "end_time": end,
    })
}

#[tokio::test]
async fn test_overlapping_shift_conflicts() {
    let app = setup_test_app().await;
    let client = app.client();
    let dealer_id = create_dealer(client, "Shift Motors").await;
    let employee_id = Uuid::new_v4();

    let response = client
        .post(&api_path(&format!("/dealers/{}/shifts", dealer_id)))
        .json(&shift_body(employee_id, "2026-03-02", "09:00:00", "17:00:00"))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = client
        .post(&api_path(&format!("/dealers/{}/shifts", dealer_id)))
        .json(&shift_body(employee_id, "2026-03-02", "16:59:00", "21:00:00"))
        .await;
    assert_eq!(response.status_code(), 409);
    let body: Value = response.json();
    assert_eq!(body["code"], "SCHEDULE_CONFLICT");
}

#[tokio::test]
async fn test_back_to_back_shifts_allowed() {
    let app = setup_test_app().await;
    let client = app.client();
    let dealer_id = create_dealer(client, "Handoff Motors").await;
    let employee_id = Uuid::new_v4();

    let response = client
        .post(&api_path(&format!("/dealers/{}/shifts", dealer_id)))
        .json(&shift_body(employee_id, "2026-03-02", "09:00:00", "17:00:00"))
        .await;
    assert_eq!(response.status_code(), 201);

    // Touching endpoints do not overlap.
    let response = client
        .post(&api_path(&format!("/dealers/{}/shifts", dealer_id)))
        .json(&shift_body(employee_id, "2026-03-02", "17:00:00", "21:00:00"))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = client
        .get(&api_path(&format!(
            "/dealers/{}/shifts?employee_id={}&date=2026-03-02",
            dealer_id, employee_id
        )))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_update_excludes_the_edited_shift() {
    let app = setup_test_app().await;
    let client = app.client();
    let dealer_id = create_dealer(client, "Revision Motors").await;
    let employee_id = Uuid::new_v4();

    let response = client
        .post(&api_path(&format!("/dealers/{}/shifts", dealer_id)))
        .json(&shift_body(employee_id, "2026-03-02", "09:00:00", "17:00:00"))
        .await;
    assert_eq!(response.status_code(), 201);
    let created: Value = response.json();
    let shift_id = created["id"].as_str().unwrap().to_string();

    // Shrinking the same shift overlaps only itself, which is allowed.
    let response = client
        .put(&api_path(&format!(
            "/dealers/{}/shifts/{}",
            dealer_id, shift_id
        )))
        .json(&shift_body(employee_id, "2026-03-02", "10:00:00", "16:00:00"))
        .await;
    assert_eq!(response.status_code(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["id"].as_str().unwrap(), shift_id);
    assert_eq!(updated["start_time"], "10:00:00");
}

#[tokio::test]
async fn test_conflict_preview() {
    let app = setup_test_app().await;
    let client = app.client();
    let dealer_id = create_dealer(client, "Preview Motors").await;
    let employee_id = Uuid::new_v4();

    let response = client
        .post(&api_path(&format!("/dealers/{}/shifts", dealer_id)))
        .json(&shift_body(employee_id, "2026-03-02", "09:00:00", "17:00:00"))
        .await;
    assert_eq!(response.status_code(), 201);
    let created: Value = response.json();

    let response = client
        .post(&api_path(&format!("/dealers/{}/shifts/conflicts", dealer_id)))
        .json(&json!({
            "employee_id": employee_id,
            "shift_date": "2026-03-02",
            "start_time": "12:00:00",
            "end_time": "18:00:00",
        }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["conflict"], true);

    let response = client
        .post(&api_path(&format!("/dealers/{}/shifts/conflicts", dealer_id)))
        .json(&json!({
            "employee_id": employee_id,
            "shift_date": "2026-03-03",
            "start_time": "12:00:00",
            "end_time": "18:00:00",
        }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["conflict"], false);

    // Excluding the stored shift clears the conflict, mirroring an edit.
    let response = client
        .post(&api_path(&format!("/dealers/{}/shifts/conflicts", dealer_id)))
        .json(&json!({
            "employee_id": employee_id,
            "shift_date": "2026-03-02",
            "start_time": "12:00:00",
            "end_time": "18:00:00",
            "exclude_shift_id": created["id"],
        }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["conflict"], false);
}

#[tokio::test]
async fn test_inverted_time_range_rejected() {
    let app = setup_test_app().await;
    let client = app.client();
    let dealer_id = create_dealer(client, "Backwards Motors").await;

    let response = client
        .post(&api_path(&format!("/dealers/{}/shifts", dealer_id)))
        .json(&shift_body(Uuid::new_v4(), "2026-03-02", "17:00:00", "09:00:00"))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].as_str().unwrap().contains("end_time"));
}

#[tokio::test]
async fn test_delete_shift() {
    let app = setup_test_app().await;
    let client = app.client();
    let dealer_id = create_dealer(client, "Cleanup Motors").await;

    let response = client
        .post(&api_path(&format!("/dealers/{}/shifts", dealer_id)))
        .json(&shift_body(Uuid::new_v4(), "2026-03-02", "09:00:00", "17:00:00"))
        .await;
    let created: Value = response.json();
    let shift_id = created["id"].as_str().unwrap().to_string();

    let response = client
        .delete(&api_path(&format!(
            "/dealers/{}/shifts/{}",
            dealer_id, shift_id
        )))
        .await;
    assert_eq!(response.status_code(), 204);

    let response = client
        .get(&api_path(&format!(
            "/dealers/{}/shifts/{}",
            dealer_id, shift_id
        )))
        .await;
    assert_eq!(response.status_code(), 404);
}
