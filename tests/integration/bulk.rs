//! POST /route/bulk behaviour

use crate::integration::fixture::{ScriptedEngine, TestApp};
use route_orchestrator::types::GeoPoint;
use serde_json::json;

const BODY: &str = r#"{
    "originPoint": {"lat": 52.5, "lon": 13.4},
    "destinations": [
        {"id": "a", "destinationPoint": {"lat": 52.6, "lon": 13.5}},
        {"id": 2, "destinationPoint": {"lat": 10.0, "lon": 10.0}},
        {"id": "c", "destinationPoint": [13.3, 52.7]}
    ]
}"#;

#[tokio::test]
async fn test_bulk_isolates_failures_and_keeps_order() {
    let engine = ScriptedEngine::new().with_unreachable(GeoPoint::new(10.0, 10.0));
    let app = TestApp::new(engine);
    let res = app.post_json("/route/bulk", BODY).await;

    assert_eq!(res.status, 200);
    let json = res.json();
    assert_eq!(
        json["data"],
        json!([
            {"id": "a", "distance": 1000.0, "time": 60000},
            {"id": "2", "error": "Cannot find point 0: 10,10"},
            {"id": "c", "distance": 1000.0, "time": 60000}
        ])
    );
    assert_eq!(
        json["info"]["copyrights"],
        json!(["Swift Routes", "powered by GraphHopper"])
    );
    assert_eq!(app.engine.call_count(), 3);
}

#[tokio::test]
async fn test_bulk_sub_requests_go_destination_first() {
    let app = TestApp::new(ScriptedEngine::new());
    app.post_json("/route/bulk?locale=de", BODY).await;

    let calls = app.engine.calls();
    assert_eq!(calls[0].points, vec![GeoPoint::new(52.6, 13.5), GeoPoint::new(52.5, 13.4)]);
    for call in &calls {
        assert_eq!(call.profile, "car");
        assert_eq!(call.locale, "de");
        assert_eq!(call.snap_preventions, vec!["tunnel", "ferry"]);
        assert!(!call.hints.contains("locale"));
    }
}

#[tokio::test]
async fn test_concurrent_bulk_keeps_request_order() {
    let engine = ScriptedEngine::new()
        .concurrent()
        .with_slow_point(GeoPoint::new(52.6, 13.5));
    let app = TestApp::new(engine);
    let res = app.post_json("/route/bulk", BODY).await;

    assert_eq!(res.status, 200);
    let json = res.json();
    let ids: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "2", "c"]);
}

#[tokio::test]
async fn test_single_unreachable_destination() {
    let engine = ScriptedEngine::new().with_unreachable(GeoPoint::new(10.0, 10.0));
    let app = TestApp::new(engine);
    let res = app
        .post_json(
            "/route/bulk",
            r#"{"originPoint": [13.4, 52.5], "destinations": [{"id": "x", "destinationPoint": [10, 10]}]}"#,
        )
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(
        res.json()["data"],
        json!([{"id": "x", "error": "Cannot find point 0: 10,10"}])
    );
}

#[tokio::test]
async fn test_empty_bulk_is_400() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app.post_json("/route/bulk", r#"{"destinations": []}"#).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.json()["message"], "You have to pass at least one point");
    assert_eq!(app.engine.call_count(), 0);
}

#[tokio::test]
async fn test_bulk_without_origin_is_400() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app
        .post_json(
            "/route/bulk",
            r#"{"destinations": [{"id": "a", "destinationPoint": [13.5, 52.6]}]}"#,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.json()["message"], "You have to pass the originPoint");
}

#[tokio::test]
async fn test_bulk_malformed_body_is_400() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app.post_json("/route/bulk", "not json").await;

    assert_eq!(res.status, 400);
    assert_eq!(res.json()["hints"][0]["details"], "invalid_argument");
}
