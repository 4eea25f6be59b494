//! GET /route behaviour

use crate::integration::fixture::{ScriptedEngine, TestApp};
use route_orchestrator::server::TOOK_HEADER;
use route_orchestrator::types::{GeoPoint, HintValue};

#[tokio::test]
async fn test_get_route_success() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app
        .get("/route?point=52.5,13.4&point=52.6,13.5&profile=car&points_encoded=false")
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert!(res.header(TOOK_HEADER).is_some());
    let json = res.json();
    let path = &json["paths"][0];
    assert_eq!(path["distance"], 1000.0);
    assert_eq!(path["points_encoded"], false);
    assert_eq!(path["points"]["coordinates"][0][0], 13.4);
    assert_eq!(json["paths"].as_array().unwrap().len(), 1);
    assert_eq!(app.engine.calls()[0].profile, "car");
}

#[tokio::test]
async fn test_missing_point_never_reaches_engine() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app.get("/route?profile=car").await;

    assert_eq!(res.status, 400);
    assert!(res.header(TOOK_HEADER).is_none());
    let json = res.json();
    assert_eq!(json["message"], "You have to pass at least one point");
    assert_eq!(json["hints"][0]["details"], "invalid_argument");
    assert_eq!(app.engine.call_count(), 0);
}

#[tokio::test]
async fn test_unparsable_point_is_400() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app.get("/route?point=abc&point=52.6,13.5&profile=car").await;

    assert_eq!(res.status, 400);
    assert!(res.json()["message"].as_str().unwrap().contains("Cannot parse point"));
    assert_eq!(app.engine.call_count(), 0);
}

#[tokio::test]
async fn test_point_not_found_is_400_with_point_index() {
    let engine = ScriptedEngine::new().with_unreachable(GeoPoint::new(10.0, 10.0));
    let app = TestApp::new(engine);
    let res = app.get("/route?point=52.5,13.4&point=10,10&profile=car").await;

    assert_eq!(res.status, 400);
    let json = res.json();
    assert_eq!(json["message"], "Cannot find point 1: 10,10");
    assert_eq!(json["hints"][0]["details"], "point_not_found");
    assert_eq!(json["hints"][0]["point_index"], 1);
}

#[tokio::test]
async fn test_snap_prevention_absent_uses_default() {
    let app = TestApp::new(ScriptedEngine::new());
    app.get("/route?point=52.5,13.4&point=52.6,13.5&profile=car").await;

    assert_eq!(app.engine.calls()[0].snap_preventions, vec!["tunnel", "ferry"]);
}

#[tokio::test]
async fn test_single_empty_snap_prevention_clears_default() {
    let app = TestApp::new(ScriptedEngine::new());
    app.get("/route?point=52.5,13.4&point=52.6,13.5&profile=car&snap_prevention=")
        .await;

    assert!(app.engine.calls()[0].snap_preventions.is_empty());
}

#[tokio::test]
async fn test_explicit_snap_preventions_used_verbatim() {
    let app = TestApp::new(ScriptedEngine::new());
    app.get("/route?point=52.5,13.4&point=52.6,13.5&profile=car&snap_prevention=motorway&snap_prevention=bridge")
        .await;

    assert_eq!(app.engine.calls()[0].snap_preventions, vec!["motorway", "bridge"]);
}

#[tokio::test]
async fn test_legacy_hints_pick_profile_and_are_stripped() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app
        .get("/route?point=52.5,13.4&point=52.6,13.5&vehicle=car&turn_costs=true&ch.disable=true")
        .await;

    assert_eq!(res.status, 200);
    let call = &app.engine.calls()[0];
    assert_eq!(call.profile, "car_tc");
    for key in ["vehicle", "weighting", "turn_costs", "edge_based"] {
        assert!(!call.hints.contains(key), "{key} reached the engine");
    }
    assert_eq!(call.hints.get("ch.disable"), Some(&HintValue::Bool(true)));
}

#[tokio::test]
async fn test_structural_keys_are_not_hints() {
    let app = TestApp::new(ScriptedEngine::new());
    app.get("/route?point=52.5,13.4&point=52.6,13.5&profile=car&locale=de&type=json")
        .await;

    let call = &app.engine.calls()[0];
    assert_eq!(call.locale, "de");
    for key in ["point", "profile", "locale", "type"] {
        assert!(!call.hints.contains(key), "{key} leaked into hints");
    }
}

#[tokio::test]
async fn test_unknown_profile_is_400() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app.get("/route?point=52.5,13.4&point=52.6,13.5&profile=truck").await;

    assert_eq!(res.status, 400);
    assert!(res.json()["message"]
        .as_str()
        .unwrap()
        .starts_with("The requested profile 'truck' does not exist"));
    assert_eq!(app.engine.call_count(), 0);
}

#[tokio::test]
async fn test_elevation_without_support_is_400() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app
        .get("/route?point=52.5,13.4&point=52.6,13.5&profile=car&elevation=true")
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.json()["message"], "Elevation not supported!");
}

#[tokio::test]
async fn test_gpx_success_is_attachment() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app
        .get("/route?point=52.5,13.4&point=52.6,13.5&profile=car&type=gpx")
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.header("content-type"), Some("application/gpx+xml"));
    assert_eq!(
        res.header("content-disposition"),
        Some("attachment;filename=GraphHopper.gpx")
    );
    assert!(res.body.contains("<gpx"));
    assert!(res.body.contains("<trk>"));
}

#[tokio::test]
async fn test_gpx_with_alternatives_is_rejected() {
    let app = TestApp::new(ScriptedEngine::new().with_alternatives(2));
    let res = app
        .get("/route?point=52.5,13.4&point=52.6,13.5&profile=car&type=gpx")
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.header("content-type"), Some("application/gpx+xml"));
    assert!(res.header("content-disposition").is_none());
    assert!(res.body.contains("Alternatives are currently not yet supported for GPX"));
}

#[tokio::test]
async fn test_json_with_alternatives_lists_all_paths() {
    let app = TestApp::new(ScriptedEngine::new().with_alternatives(2));
    let res = app.get("/route?point=52.5,13.4&point=52.6,13.5&profile=car").await;

    assert_eq!(res.status, 200);
    let json = res.json();
    let paths = json["paths"].as_array().unwrap();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[1]["distance"], 2000.0);
}

#[tokio::test]
async fn test_gpx_error_is_xml_document() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app.get("/route?profile=car&type=gpx").await;

    assert_eq!(res.status, 400);
    assert_eq!(res.header("content-type"), Some("application/gpx+xml"));
    assert!(res.body.contains("<message>You have to pass at least one point</message>"));
    assert!(res.body.contains("details=\"invalid_argument\""));
}

#[tokio::test]
async fn test_xml_error_keeps_xml_content_type() {
    let app = TestApp::new(ScriptedEngine::new());
    let res = app.get("/route?profile=car&type=xml").await;

    assert_eq!(res.status, 400);
    assert_eq!(res.header("content-type"), Some("application/xml"));
    assert!(res.body.contains("<message>You have to pass at least one point</message>"));
}

#[tokio::test]
async fn test_out_of_range_multiplier_is_400() {
    let app = TestApp::new(ScriptedEngine::new());
    for multiplier in ["1e19", "0", "-1e5", "inf"] {
        let res = app
            .get(&format!(
                "/route?point=52.5,13.4&point=52.6,-13.5&profile=car&points_encoded_multiplier={multiplier}"
            ))
            .await;
        assert_eq!(res.status, 400, "{multiplier}");
        assert!(res.json()["message"]
            .as_str()
            .unwrap()
            .starts_with("points_encoded_multiplier must be greater than 0"));
    }
    assert_eq!(app.engine.call_count(), 0);

    let res = app
        .get("/route?point=52.5,13.4&point=52.6,-13.5&profile=car&points_encoded_multiplier=1e6")
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.json()["paths"][0]["points_encoded_multiplier"], 1e6);
}
