//! HTTP tests for adapter registration and status.

use super::helpers::{HttpContext, http};
use axum::http::{Method, Request, StatusCode, header};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_then_list_adapters(http: HttpContext) {
    let (status, body) = http
        .post(
            "/api/mcp/register",
            &json!({
                "id": "m1",
                "name": "Manus",
                "endpoint": "http://localhost:8001",
                "data_types": ["manus_conversation"]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "adapter_id": "m1"}));

    let (status, adapters) = http.get("/api/mcp/adapters").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(adapters["m1"]["name"], json!("Manus"));
    assert_eq!(adapters["m1"]["status"], json!("active"));
    assert_eq!(adapters["m1"]["data_types"], json!(["manus_conversation"]));
    assert!(adapters["m1"]["last_heartbeat"].is_string());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reregistration_updates_status(http: HttpContext) {
    for status in ["active", "maintenance"] {
        let (code, _) = http
            .post(
                "/api/mcp/register",
                &json!({"id": "m1", "name": "Manus", "endpoint": "http://x", "status": status}),
            )
            .await;
        assert_eq!(code, StatusCode::OK);
    }

    let (_, adapters) = http.get("/api/mcp/adapters").await;
    assert_eq!(adapters.as_object().map(serde_json::Map::len), Some(1));
    assert_eq!(adapters["m1"]["status"], json!("maintenance"));
}

#[rstest]
#[case(json!({"id": "", "name": "Manus", "endpoint": "http://x"}), "id")]
#[case(json!({"id": "m1", "name": " ", "endpoint": "http://x"}), "name")]
#[case(json!({"id": "m1", "name": "Manus", "endpoint": "http://x", "status": "retired"}), "status")]
#[case(json!({"id": "m1", "name": "Manus", "endpoint": "http://x", "data_types": ["bogus"]}), "data_types")]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_registrations_are_rejected(
    http: HttpContext,
    #[case] payload: serde_json::Value,
    #[case] field: &str,
) {
    let (status, body) = http.post("/api/mcp/register", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains(field), "'{message}' should name '{field}'");

    let (_, adapters) = http.get("/api/mcp/adapters").await;
    assert_eq!(adapters, json!({}));
}

#[rstest]
#[case("id")]
#[case("name")]
#[case("endpoint")]
#[tokio::test(flavor = "multi_thread")]
async fn missing_registration_fields_are_named(http: HttpContext, #[case] field: &str) {
    let mut payload = json!({"id": "m1", "name": "Manus", "endpoint": "http://x"});
    payload
        .as_object_mut()
        .expect("payload object")
        .remove(field);

    let (status, body) = http.post("/api/mcp/register", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    let message = body["error"].as_str().expect("error message");
    let expected = format!("missing field `{field}`");
    assert!(message.contains(&expected), "'{message}' should contain '{expected}'");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_json_is_rejected(http: HttpContext) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/mcp/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .expect("valid request");

    let (status, body) = http.send_request(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closed_registry_reports_unavailable(http: HttpContext) {
    http.state.registry.close();

    let (status, body) = http
        .post(
            "/api/mcp/register",
            &json!({"id": "m1", "name": "Manus", "endpoint": "http://x"}),
        )
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], json!(false));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_reports_version(http: HttpContext) {
    let (status, body) = http.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}
