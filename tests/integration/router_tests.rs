//! In-process API tests against the router with in-memory storage

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use smart_vms_server::{
    api,
    config::AppConfig,
    repository::storage::{KeyValueStorage, MemoryStorage},
    AppState,
};

fn app_with(storage: Arc<dyn KeyValueStorage>) -> Router {
    api::create_router(AppState::new(AppConfig::default(), storage))
}

fn app() -> Router {
    app_with(Arc::new(MemoryStorage::new()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn walk_in(name: &str) -> Value {
    json!({
        "name": name,
        "cnic": "35202-1234567-1",
        "contact": "0300-1234567",
        "purpose": "Guest",
        "houseNumber": "A-1",
        "residentName": "Jane Doe",
        "photo": "data:image/jpeg;base64,AAAA"
    })
}

async fn register(app: &Router, name: &str) -> Value {
    let (status, body) = send(app, post("/api/v1/visitors", walk_in(name))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = app();

    let (status, body) = send(&app, get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, get("/api/v1/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_register_and_lookup() {
    let app = app();
    let visitor = register(&app, "John Doe").await;
    let id = visitor["id"].as_str().unwrap();
    assert!(id.starts_with("VIS"));
    assert_eq!(visitor["status"], "checked-in");
    assert_eq!(visitor["houseNumber"], "A-1");

    let (status, found) = send(&app, get(&format!("/api/v1/visitors/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, visitor);

    let (status, pass) = send(&app, get(&format!("/api/v1/visitors/{}/pass", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pass["qrPayload"], id);
    assert_eq!(pass["residentName"], "Jane Doe");
}

#[tokio::test]
async fn test_register_without_photo_is_rejected() {
    let app = app();
    let mut request = walk_in("John Doe");
    request["photo"] = json!("");

    let (status, body) = send(&app, post("/api/v1/visitors", request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 18);

    let (_, log) = send(&app, get("/api/v1/visitors")).await;
    assert_eq!(log["total"], 0);
}

#[tokio::test]
async fn test_unknown_visitor_is_not_found() {
    let app = app();
    let (status, body) = send(&app, get("/api/v1/visitors/VIS404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchVisitor");

    let (status, _) = send(&app, post("/api/v1/visitors/VIS404/check-out", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_check_out_once() {
    let app = app();
    let visitor = register(&app, "John Doe").await;
    let uri = format!("/api/v1/visitors/{}/check-out", visitor["id"].as_str().unwrap());

    let (status, first) = send(&app, post(&uri, json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "checked-out");
    assert!(first["checkOutTime"].is_string());

    let (status, body) = send(&app, post(&uri, json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "This visitor has already checked out");

    let (_, stored) = send(&app, get(&format!("/api/v1/visitors/{}", first["id"].as_str().unwrap()))).await;
    assert_eq!(stored["checkOutTime"], first["checkOutTime"]);
}

#[tokio::test]
async fn test_visitor_log_filters() {
    let app = app();
    register(&app, "John Doe").await;
    register(&app, "Sara Ali").await;
    let johnny = register(&app, "Johnny").await;
    let uri = format!("/api/v1/visitors/{}/check-out", johnny["id"].as_str().unwrap());
    send(&app, post(&uri, json!({}))).await;

    let (status, log) = send(&app, get("/api/v1/visitors")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(log["total"], 3);
    assert_eq!(log["visitors"][0]["name"], "Johnny");

    let (_, log) = send(&app, get("/api/v1/visitors?search=john&status=checked-in")).await;
    assert_eq!(log["showing"], 1);
    assert_eq!(log["total"], 3);
    assert_eq!(log["visitors"][0]["name"], "John Doe");

    let (_, log) = send(&app, get("/api/v1/visitors?status=checked-out")).await;
    assert_eq!(log["showing"], 1);
}

#[tokio::test]
async fn test_pre_approval_flow() {
    let app = app();
    let (status, visitor) = send(
        &app,
        post(
            "/api/v1/pre-approvals",
            json!({
                "name": "Ali Khan",
                "cnic": "35202-7654321-1",
                "contact": "0311-1234567",
                "houseNumber": "B-12",
                "residentName": "Sara",
                "approvedBy": "Sara"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(visitor["status"], "pre-approved");
    assert_eq!(visitor["preApproved"], true);
    assert_eq!(visitor["purpose"], "Pre-approved visit");
    let id = visitor["id"].as_str().unwrap();
    assert!(id.starts_with("PRE"));

    let (_, pending) = send(&app, get("/api/v1/pre-approvals")).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, post(&format!("/api/v1/visitors/{}/check-out", id), json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, dashboard) = send(&app, get("/api/v1/stats/dashboard")).await;
    assert_eq!(dashboard["pendingPreApprovals"], 1);
}

#[tokio::test]
async fn test_stats() {
    let app = app();
    let visitor = register(&app, "John Doe").await;
    register(&app, "Sara Ali").await;
    let uri = format!("/api/v1/visitors/{}/check-out", visitor["id"].as_str().unwrap());
    send(&app, post(&uri, json!({}))).await;

    let (status, stats) = send(&app, get("/api/v1/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalVisitors"], 2);
    assert_eq!(stats["activeVisitors"], 1);
    assert_eq!(stats["completedVisits"], 1);
    assert_eq!(stats["averageStayMinutes"], 0);
    assert_eq!(stats["purposeDistribution"][0]["purpose"], "Guest");
    assert_eq!(stats["purposeDistribution"][0]["count"], 2);
    assert_eq!(stats["purposeDistribution"][0]["sharePercent"], 100);
}

#[tokio::test]
async fn test_export_csv() {
    let app = app();
    register(&app, "John Doe").await;

    let response = app
        .clone()
        .oneshot(get("/api/v1/visitors/export?search=john"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"visitor-log-"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], "Pass ID,Name,CNIC,Contact,House,Purpose,Check-in,Check-out,Status");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with(",N/A,checked-in"));
}

#[tokio::test]
async fn test_clear_all_data() {
    let app = app();
    register(&app, "John Doe").await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/visitors")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, log) = send(&app, get("/api/v1/visitors")).await;
    assert_eq!(log["total"], 0);
}

#[tokio::test]
async fn test_storage_full_reports_failure() {
    let app = app_with(Arc::new(MemoryStorage::with_quota(32)));

    let (status, body) = send(&app, post("/api/v1/visitors", walk_in("John Doe"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 3);
    assert_eq!(body["message"], "Failed to save visitor data");

    let (_, log) = send(&app, get("/api/v1/visitors")).await;
    assert_eq!(log["total"], 0);
}

#[tokio::test]
async fn test_corrupt_storage_reads_as_empty() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(&AppConfig::default().storage.key, "not json at all")
        .unwrap();
    let app = app_with(storage);

    let (status, log) = send(&app, get("/api/v1/visitors")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(log["total"], 0);

    let (status, _) = send(&app, get("/api/v1/stats")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app();
    let (status, doc) = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/visitors/{id}/check-out"].is_object());
}
