//! POST /route behaviour

use crate::integration::fixture::{ScriptedEngine, TestApp};

#[tokio::test]
async fn test_get_and_post_dispatch_the_same_request() {
    let app = TestApp::new(ScriptedEngine::new());
    let get = app
        .get("/route?point=52.5,13.4&point=52.6,13.5&profile=car&ch.disable=true")
        .await;
    let post = app
        .post_json(
            "/route",
            r#"{"points": [[13.4, 52.5], [13.5, 52.6]], "profile": "car", "ch.disable": true}"#,
        )
        .await;

    assert_eq!(get.status, 200);
    assert_eq!(post.status, 200);
    let calls = app.engine.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test]
async fn test_numeric_hints_dispatch_identically() {
    let app = TestApp::new(ScriptedEngine::new());
    let get = app
        .get("/route?point=52.5,13.4&point=52.6,13.5&profile=car&way_point_max_distance=1&turn_penalty=2.0&ratio=0.25")
        .await;
    let post = app
        .post_json(
            "/route",
            r#"{"points": [[13.4, 52.5], [13.5, 52.6]], "profile": "car", "way_point_max_distance": 1, "turn_penalty": 2, "ratio": 0.25}"#,
        )
        .await;

    assert_eq!(get.status, 200);
    assert_eq!(post.status, 200);
    let calls = app.engine.calls();
    assert_eq!(calls[0].hints.get("way_point_max_distance"), calls[1].hints.get("way_point_max_distance"));
    assert_eq!(calls[0].hints.get_f64("turn_penalty", 0.0), 2.0);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test]
async fn test_post_accepts_object_points() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app
        .post_json(
            "/route",
            r#"{"points": [{"lat": 52.5, "lon": 13.4}, {"lat": 52.6, "lon": 13.5}], "profile": "bike"}"#,
        )
        .await;

    assert_eq!(res.status, 200);
    assert!(res.json()["paths"][0]["points"].is_string());
    assert_eq!(app.engine.calls()[0].profile, "bike");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app.post_json("/route", r#"{"points": [[13.4, 52.5]"#).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(res.json()["hints"][0]["details"], "invalid_argument");
    assert_eq!(app.engine.call_count(), 0);
}

#[tokio::test]
async fn test_post_without_points_is_400() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app.post_json("/route", r#"{"points": [], "profile": "car"}"#).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.json()["message"], "You have to pass at least one point");
    assert_eq!(app.engine.call_count(), 0);
}

#[tokio::test]
async fn test_custom_model_requires_profile() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app
        .post_json(
            "/route",
            r#"{"points": [[13.4, 52.5], [13.5, 52.6]], "custom_model": {"priority": []}}"#,
        )
        .await;

    assert_eq!(res.status, 400);
    assert!(res.json()["message"]
        .as_str()
        .unwrap()
        .starts_with("The 'profile' parameter is required"));
    assert_eq!(app.engine.call_count(), 0);
}

#[tokio::test]
async fn test_post_snap_preventions() {
    let app = TestApp::new(ScriptedEngine::new());
    app.post_json(
        "/route",
        r#"{"points": [[13.4, 52.5], [13.5, 52.6]], "profile": "car"}"#,
    )
    .await;
    app.post_json(
        "/route",
        r#"{"points": [[13.4, 52.5], [13.5, 52.6]], "profile": "car", "snap_preventions": []}"#,
    )
    .await;
    app.post_json(
        "/route",
        r#"{"points": [[13.4, 52.5], [13.5, 52.6]], "profile": "car", "snap_preventions": ["motorway"]}"#,
    )
    .await;

    let calls = app.engine.calls();
    assert_eq!(calls[0].snap_preventions, vec!["tunnel", "ferry"]);
    assert!(calls[1].snap_preventions.is_empty());
    assert_eq!(calls[2].snap_preventions, vec!["motorway"]);
}

#[tokio::test]
async fn test_post_legacy_hints_never_reach_engine() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app
        .post_json(
            "/route",
            r#"{"points": [[13.4, 52.5], [13.5, 52.6]], "vehicle": "bike", "weighting": "fastest"}"#,
        )
        .await;

    assert_eq!(res.status, 200);
    let call = &app.engine.calls()[0];
    assert_eq!(call.profile, "bike");
    assert!(!call.hints.contains("vehicle"));
    assert!(!call.hints.contains("weighting"));
}
