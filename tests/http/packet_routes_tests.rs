//! HTTP tests for packet intake and read-side queries.

use super::helpers::{HttpContext, http};
use axum::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

fn conversation_packet() -> Value {
    json!({
        "id": "p1",
        "source_mcp": "m1",
        "data_type": "manus_conversation",
        "content": {"conversation_id": "c1", "message_type": "user", "content": "hi"},
        "timestamp": "2024-01-01T00:00:00"
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conversation_flow_end_to_end(http: HttpContext) {
    let (status, _) = http
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

    let (status, receipt) = http.post("/api/data/receive", &conversation_packet()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["success"], json!(true));
    assert_eq!(receipt["packet_id"], json!("p1"));
    assert_eq!(
        receipt["projection"],
        json!({"outcome": "stored", "kind": "conversation"})
    );

    let (_, counts) = http.get("/api/data/statistics").await;
    assert_eq!(counts["manus_conversation"], json!(1));
    assert_eq!(counts["trae_code_interaction"], json!(0));

    let (status, rows) = http.get("/api/manus/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows["success"], json!(true));
    let data = rows["data"].as_array().expect("row array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], json!("p1"));
    assert_eq!(data[0]["conversation_id"], json!("c1"));
    assert_eq!(data[0]["message_type"], json!("user"));
    assert_eq!(data[0]["content"], json!("hi"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_tag_is_rejected_without_counting(http: HttpContext) {
    let mut packet = conversation_packet();
    packet["data_type"] = json!("unknown_tag");

    let (status, body) = http.post("/api/data/receive", &packet).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    let (_, counts) = http.get("/api/data/statistics").await;
    let total: u64 = counts
        .as_object()
        .expect("counts object")
        .values()
        .filter_map(Value::as_u64)
        .sum();
    assert_eq!(total, 0);
}

#[rstest]
#[case("id", json!(""))]
#[case("source_mcp", json!("  "))]
#[case("timestamp", json!("not a time"))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_packet_fields_are_rejected(
    http: HttpContext,
    #[case] field: &str,
    #[case] value: Value,
) {
    let mut packet = conversation_packet();
    packet[field] = value;

    let (status, body) = http.post("/api/data/receive", &packet).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains(field), "'{message}' should name '{field}'");
}

#[rstest]
#[case("id")]
#[case("source_mcp")]
#[case("data_type")]
#[case("content")]
#[case("timestamp")]
#[tokio::test(flavor = "multi_thread")]
async fn missing_packet_fields_are_named(http: HttpContext, #[case] field: &str) {
    let mut packet = conversation_packet();
    packet
        .as_object_mut()
        .expect("packet object")
        .remove(field);

    let (status, body) = http.post("/api/data/receive", &packet).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    let message = body["error"].as_str().expect("error message");
    let expected = format!("missing field `{field}`");
    assert!(message.contains(&expected), "'{message}' should contain '{expected}'");
    let (_, counts) = http.get("/api/data/statistics").await;
    assert_eq!(counts["manus_conversation"], json!(0));
}

#[rstest]
#[case("+10000-01-01T00:00:00")]
#[case("9999-12-31T23:00:00-02:00")]
#[tokio::test(flavor = "multi_thread")]
async fn five_digit_years_are_rejected_and_reads_stay_healthy(
    http: HttpContext,
    #[case] timestamp: &str,
) {
    let (status, _) = http.post("/api/data/receive", &conversation_packet()).await;
    assert_eq!(status, StatusCode::OK);

    let mut far_future = conversation_packet();
    far_future["id"] = json!("p2");
    far_future["timestamp"] = json!(timestamp);
    let (status, body) = http.post("/api/data/receive", &far_future).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("timestamp"), "'{message}' should name 'timestamp'");

    for uri in ["/api/manus/data", "/api/data/projections/manus_conversation"] {
        let (status, rows) = http.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri} should stay readable");
        let data = rows["data"].as_array().expect("row array");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], json!("p1"));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn logged_only_tag_is_counted_but_not_projected(http: HttpContext) {
    let (status, receipt) = http
        .post(
            "/api/data/receive",
            &json!({
                "id": "e1",
                "source_mcp": "edge",
                "data_type": "cloud_edge_data",
                "content": {"cpu": 0.5},
                "timestamp": "2024-01-01T00:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["projection"], json!({"outcome": "not_applicable"}));

    let (_, counts) = http.get("/api/data/statistics").await;
    assert_eq!(counts["cloud_edge_data"], json!(1));
    let (_, manus) = http.get("/api/manus/data").await;
    assert_eq!(manus["data"], json!([]));
    let (_, trae) = http.get("/api/trae/data").await;
    assert_eq!(trae["data"], json!([]));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projection_route_reads_by_tag_with_limit(http: HttpContext) {
    for (id, timestamp) in [("t1", "2024-01-01T00:00:00"), ("t2", "2024-01-02T00:00:00")] {
        let (status, _) = http
            .post(
                "/api/data/receive",
                &json!({
                    "id": id,
                    "source_mcp": "trae",
                    "data_type": "trae_code_interaction",
                    "content": {"session_id": "s1", "code_content": "let x = 1;"},
                    "timestamp": timestamp
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = http
        .get("/api/data/projections/trae_code_interaction?limit=1")
        .await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().expect("row array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], json!("t2"));
    assert_eq!(data[0]["session_id"], json!("s1"));
}

#[rstest]
#[case("/api/data/projections/rl_srt_data")]
#[case("/api/data/projections/unknown_tag")]
#[case("/api/data/projections/manus_conversation?limit=lots")]
#[tokio::test(flavor = "multi_thread")]
async fn projection_route_rejects_bad_queries(http: HttpContext, #[case] uri: &str) {
    let (status, body) = http.get(uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn system_status_combines_adapters_and_counts(http: HttpContext) {
    http.post(
        "/api/mcp/register",
        &json!({"id": "m1", "name": "Manus", "endpoint": "http://x"}),
    )
    .await;
    http.post("/api/data/receive", &conversation_packet()).await;

    let (status, body) = http.get("/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adapters"]["m1"]["name"], json!("Manus"));
    assert_eq!(body["data_statistics"]["manus_conversation"], json!(1));
    assert!(body["timestamp"].is_string());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn retagged_packet_leaves_no_stale_conversation_row(http: HttpContext) {
    let (status, _) = http.post("/api/data/receive", &conversation_packet()).await;
    assert_eq!(status, StatusCode::OK);

    let mut retagged = conversation_packet();
    retagged["data_type"] = json!("cloud_edge_data");
    let (status, receipt) = http.post("/api/data/receive", &retagged).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["projection"], json!({"outcome": "not_applicable"}));

    let (_, counts) = http.get("/api/data/statistics").await;
    assert_eq!(counts["manus_conversation"], json!(0));
    assert_eq!(counts["cloud_edge_data"], json!(1));
    for uri in ["/api/manus/data", "/api/data/projections/manus_conversation"] {
        let (status, rows) = http.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(rows["data"], json!([]), "{uri}");
    }
}
