//! Test fixtures: CSV inventory feeds and multipart upload builders.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use super::api_path;

/// Semicolon-separated feed: 3 rows, one missing its make, one with a
/// non-numeric price. Only the first row survives validation.
pub fn semicolon_feed() -> &'static str {
    "stock number;make;model;price;status\n\
     A1;Honda;Civic;19995;used\n\
     A2;;Civic;18500;used\n\
     A3;Honda;Accord;call us;used\n"
}

/// Comma-separated feed with clean rows only.
#[allow(dead_code)]
pub fn comma_feed() -> &'static str {
    "stock_number,make,model,price,status\n\
     B1,Toyota,Camry,27000,new\n\
     B2,Toyota,Corolla,23500,new\n"
}

/// Build a multipart form carrying a single named CSV file.
pub fn csv_upload(filename: &str, content: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "files",
        Part::bytes(content.as_bytes().to_vec())
            .file_name(filename.to_string())
            .mime_type("text/csv"),
    )
}

/// Register a dealer through the API and return its id.
pub async fn create_dealer(client: &TestServer, name: &str) -> Uuid {
    let response = client
        .post(&api_path("/dealers"))
        .json(&json!({ "name": name }))
        .await;
    assert_eq!(response.status_code(), 201, "dealer creation failed");
    let body: Value = response.json();
    body["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("dealer response carries a UUID id")
}
