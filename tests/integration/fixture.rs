//! In-process HTTP fixture around a scripted, recording engine

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use route_orchestrator::config::{OrchestratorConfig, ProfileConfig};
use route_orchestrator::profile::ConfiguredProfileResolver;
use route_orchestrator::server::{create_router, AppState};
use route_orchestrator::types::{
    sign, GeoPoint, Instruction, PathPoint, ResponsePath, RouteError, RouteOutcome,
    RoutingRequest,
};
use route_orchestrator::{RouteOrchestrator, RoutingEngine};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// Engine double: records every request and answers from a small script.
///
/// - any point listed in `unreachable` yields a point-not-found failure
/// - otherwise `alternatives` paths are returned, 1 km longer each
/// - a request whose first point is `slow_point` is delayed
pub struct ScriptedEngine {
    calls: Mutex<Vec<RoutingRequest>>,
    unreachable: Vec<GeoPoint>,
    alternatives: usize,
    slow_point: Option<GeoPoint>,
    concurrent: bool,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            unreachable: Vec::new(),
            alternatives: 1,
            slow_point: None,
            concurrent: false,
        }
    }

    pub fn with_unreachable(mut self, point: GeoPoint) -> Self {
        self.unreachable.push(point);
        self
    }

    pub fn with_alternatives(mut self, n: usize) -> Self {
        self.alternatives = n;
        self
    }

    pub fn with_slow_point(mut self, point: GeoPoint) -> Self {
        self.slow_point = Some(point);
        self
    }

    pub fn concurrent(mut self) -> Self {
        self.concurrent = true;
        self
    }

    pub fn calls(&self) -> Vec<RoutingRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn path(request: &RoutingRequest, extra_km: f64) -> ResponsePath {
        let points: Vec<PathPoint> = request.points.iter().copied().map(PathPoint::from).collect();
        let distance = 1000.0 * (request.points.len() as f64 - 1.0) + extra_km * 1000.0;
        let mut instructions: Vec<Instruction> = points
            .iter()
            .take(points.len().saturating_sub(1))
            .map(|p| {
                Instruction::new(sign::CONTINUE_ON_STREET, "Continue", vec![*p])
                    .with_distance_and_time(1000.0, 60_000)
            })
            .collect();
        if let Some(last) = points.last() {
            instructions.push(Instruction::new(sign::FINISH, "Arrive at destination", vec![*last]));
        }
        ResponsePath {
            distance,
            time: (distance * 60.0) as u64,
            weight: distance / 10.0,
            points: points.clone(),
            waypoints: points,
            instructions: Some(instructions),
            ..Default::default()
        }
    }
}

#[async_trait]
impl RoutingEngine for ScriptedEngine {
    async fn route(&self, request: &RoutingRequest) -> RouteOutcome {
        self.calls.lock().unwrap().push(request.clone());
        if self.slow_point.is_some() && request.points.first() == self.slow_point.as_ref() {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        let missing: Vec<RouteError> = request
            .points
            .iter()
            .enumerate()
            .filter(|(_, p)| self.unreachable.contains(p))
            .map(|(i, p)| RouteError::point_not_found(format!("Cannot find point {}: {}", i, p), i))
            .collect();
        if !missing.is_empty() {
            return RouteOutcome::Failure { errors: missing };
        }
        let paths = (0..self.alternatives)
            .map(|i| Self::path(request, i as f64))
            .collect();
        RouteOutcome::success(paths)
    }

    fn supports_concurrent_routing(&self) -> bool {
        self.concurrent
    }
}

pub struct TestApp {
    pub router: Router,
    pub engine: Arc<ScriptedEngine>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub fn config() -> OrchestratorConfig {
    OrchestratorConfig {
        snap_preventions_default: vec!["tunnel".to_string(), "ferry".to_string()],
        ..Default::default()
    }
}

impl TestApp {
    pub fn new(engine: ScriptedEngine) -> Self {
        Self::with_config(engine, config())
    }

    pub fn with_config(engine: ScriptedEngine, config: OrchestratorConfig) -> Self {
        let engine = Arc::new(engine);
        let resolver = ConfiguredProfileResolver::new(vec![
            ProfileConfig::new("car", "car"),
            ProfileConfig::new("car_tc", "car").with_turn_costs(true),
            ProfileConfig::new("bike", "bike"),
        ]);
        let orchestrator = RouteOrchestrator::builder()
            .with_config(config)
            .with_engine(engine.clone())
            .with_profile_resolver(Arc::new(resolver))
            .build()
            .unwrap();
        Self {
            router: create_router(AppState::new(orchestrator)),
            engine,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
