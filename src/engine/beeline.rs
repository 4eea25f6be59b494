//! Straight-line engine: every leg is the great-circle segment between two
//! consecutive request points.

use super::{RoutingEngine, DATA_DATE_PROPERTY};
use crate::error_code::ErrorKind;
use crate::types::{
    haversine_distance, sign, Instruction, PathDetail, PathPoint, ResponsePath, RouteError,
    RouteOutcome, RoutingRequest,
};
use async_trait::async_trait;
use serde_json::{json, Map};
use std::collections::{BTreeMap, HashMap};

const SUPPORTED_DETAILS: [&str; 2] = ["distance", "time"];

#[derive(Debug, Clone)]
pub struct BeelineEngine {
    /// km/h per profile name
    speeds: HashMap<String, f64>,
    /// `[min_lon, min_lat, max_lon, max_lat]`; points outside cannot be snapped.
    bounds: Option<[f64; 4]>,
    data_date: Option<String>,
}

impl Default for BeelineEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BeelineEngine {
    pub fn new() -> Self {
        let speeds = [("car", 50.0), ("bike", 15.0), ("foot", 5.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self {
            speeds,
            bounds: None,
            data_date: None,
        }
    }

    pub fn with_profile_speed(mut self, profile: impl Into<String>, kmh: f64) -> Self {
        self.speeds.insert(profile.into(), kmh);
        self
    }

    pub fn with_bounds(mut self, bounds: [f64; 4]) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_data_date(mut self, date: impl Into<String>) -> Self {
        self.data_date = Some(date.into());
        self
    }

    fn contains(&self, p: &PathPoint) -> bool {
        match self.bounds {
            Some([min_lon, min_lat, max_lon, max_lat]) => {
                p.lon >= min_lon && p.lon <= max_lon && p.lat >= min_lat && p.lat <= max_lat
            }
            None => true,
        }
    }

    fn check(&self, request: &RoutingRequest) -> Result<f64, Vec<RouteError>> {
        if request.points.len() < 2 {
            return Err(vec![RouteError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "At least 2 points have to be specified, but was: {}",
                    request.points.len()
                ),
            )]);
        }
        let speed = self.speeds.get(&request.profile).copied().ok_or_else(|| {
            vec![RouteError::new(
                ErrorKind::InvalidArgument,
                format!("The requested profile '{}' does not exist", request.profile),
            )]
        })?;
        let unknown: Vec<&str> = request
            .path_details
            .iter()
            .map(String::as_str)
            .filter(|d| !SUPPORTED_DETAILS.contains(d))
            .collect();
        if !unknown.is_empty() {
            return Err(vec![RouteError::new(
                ErrorKind::InvalidArgument,
                format!("Cannot find the path details: {:?}", unknown),
            )]);
        }
        let errors: Vec<RouteError> = request
            .points
            .iter()
            .enumerate()
            .filter(|(_, p)| !self.contains(&PathPoint::from(**p)))
            .map(|(i, p)| RouteError::point_not_found(format!("Cannot find point {}: {}", i, p), i))
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(speed)
    }

    fn build_path(&self, request: &RoutingRequest, kmh: f64) -> ResponsePath {
        let points: Vec<PathPoint> = request.points.iter().copied().map(PathPoint::from).collect();
        let ms_per_meter = 3600.0 / kmh;

        let mut instructions = Vec::with_capacity(points.len());
        let mut details: BTreeMap<String, Vec<PathDetail>> = BTreeMap::new();
        let mut distance = 0.0;
        let mut time = 0u64;
        for (i, leg) in points.windows(2).enumerate() {
            let d = haversine_distance(&leg[0], &leg[1]);
            let t = (d * ms_per_meter).round() as u64;
            distance += d;
            time += t;
            let (s, text) = if i == 0 {
                (sign::CONTINUE_ON_STREET, "Continue".to_string())
            } else {
                (sign::REACHED_VIA, format!("Waypoint {}", i))
            };
            instructions.push(Instruction::new(s, text, vec![leg[0]]).with_distance_and_time(d, t));
            for name in &request.path_details {
                let value = if name == "time" { json!(t) } else { json!((d * 1000.0).round() / 1000.0) };
                details.entry(name.clone()).or_default().push(PathDetail {
                    first: i,
                    last: i + 1,
                    value,
                });
            }
        }
        if let Some(last) = points.last() {
            instructions.push(Instruction::new(sign::FINISH, "Arrive at destination", vec![*last]));
        }

        ResponsePath {
            distance,
            time,
            weight: time as f64 / 1000.0,
            points: points.clone(),
            waypoints: points,
            instructions: request.hints.get_bool("instructions", true).then_some(instructions),
            details,
            ascend: 0.0,
            descend: 0.0,
        }
    }
}

#[async_trait]
impl RoutingEngine for BeelineEngine {
    async fn route(&self, request: &RoutingRequest) -> RouteOutcome {
        match self.check(request) {
            Ok(kmh) => {
                let path = self.build_path(request, kmh);
                let mut debug = Map::new();
                debug.insert(
                    "visited_nodes.sum".into(),
                    json!(request.points.len().saturating_sub(1)),
                );
                RouteOutcome::Success {
                    paths: vec![path],
                    debug,
                }
            }
            Err(errors) => RouteOutcome::Failure { errors },
        }
    }

    fn properties(&self) -> HashMap<String, String> {
        let mut props = HashMap::new();
        if let Some(date) = &self.data_date {
            props.insert(DATA_DATE_PROPERTY.to_string(), date.clone());
        }
        props
    }

    fn supports_concurrent_routing(&self) -> bool {
        true
    }
}
