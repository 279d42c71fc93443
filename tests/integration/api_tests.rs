//! API tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to register a walk-in visitor and return its record
async fn register_visitor(client: &Client, name: &str) -> Value {
    let response = client
        .post(format!("{}/visitors", BASE_URL))
        .json(&json!({
            "name": name,
            "cnic": "35202-1234567-1",
            "contact": "0300-1234567",
            "purpose": "Delivery",
            "houseNumber": "C-7",
            "residentName": "Resident",
            "photo": "data:image/jpeg;base64,AAAA"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status().as_u16(), 201);
    response.json().await.expect("Failed to parse visitor")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_and_check_out() {
    let client = Client::new();
    let visitor = register_visitor(&client, "Remote Visitor").await;
    let id = visitor["id"].as_str().expect("No id in response");

    let response = client
        .post(format!("{}/visitors/{}/check-out", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "checked-out");

    let response = client
        .post(format!("{}/visitors/{}/check-out", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
#[ignore]
async fn test_unknown_pass() {
    let client = Client::new();

    let response = client
        .get(format!("{}/visitors/VIS0/pass", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
#[ignore]
async fn test_search_visitors() {
    let client = Client::new();
    register_visitor(&client, "Searchable Remote").await;

    let response = client
        .get(format!("{}/visitors?search=searchable", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["showing"].as_u64().unwrap_or(0) >= 1);
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["totalVisitors"].is_number());
    assert!(body["peakHours"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_export_csv() {
    let client = Client::new();

    let response = client
        .get(format!("{}/visitors/export", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.starts_with("Pass ID,Name,CNIC"));
}
