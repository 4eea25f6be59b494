//! Engine results: computed paths and typed errors.

use super::point::PathPoint;
use crate::error_code::ErrorKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Instruction sign values understood by the formatters.
pub mod sign {
    pub const CONTINUE_ON_STREET: i32 = 0;
    pub const TURN_LEFT: i32 = -2;
    pub const TURN_RIGHT: i32 = 2;
    pub const FINISH: i32 = 4;
    pub const REACHED_VIA: i32 = 5;
}

/// One turn-by-turn instruction and the path points it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub sign: i32,
    pub text: String,
    #[serde(default)]
    pub street_name: String,
    /// meters
    pub distance: f64,
    /// milliseconds
    pub time: u64,
    pub points: Vec<PathPoint>,
}

impl Instruction {
    pub fn new(sign: i32, text: impl Into<String>, points: Vec<PathPoint>) -> Self {
        Self {
            sign,
            text: text.into(),
            street_name: String::new(),
            distance: 0.0,
            time: 0,
            points,
        }
    }

    pub fn with_street_name(mut self, name: impl Into<String>) -> Self {
        self.street_name = name.into();
        self
    }

    pub fn with_distance_and_time(mut self, distance: f64, time: u64) -> Self {
        self.distance = distance;
        self.time = time;
        self
    }

    pub fn is_waypoint(&self) -> bool {
        self.sign == sign::FINISH || self.sign == sign::REACHED_VIA
    }
}

/// A value annotation over the point interval `[first, last]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathDetail {
    pub first: usize,
    pub last: usize,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponsePath {
    /// meters
    pub distance: f64,
    /// milliseconds
    pub time: u64,
    pub weight: f64,
    pub points: Vec<PathPoint>,
    /// Snapped input points.
    #[serde(default)]
    pub waypoints: Vec<PathPoint>,
    #[serde(default)]
    pub instructions: Option<Vec<Instruction>>,
    #[serde(default)]
    pub details: BTreeMap<String, Vec<PathDetail>>,
    #[serde(default)]
    pub ascend: f64,
    #[serde(default)]
    pub descend: f64,
}

impl ResponsePath {
    /// `[min_lon, min_lat, max_lon, max_lat]`, or `None` without points.
    pub fn bbox(&self) -> Option<[f64; 4]> {
        let first = self.points.first()?;
        let mut bbox = [first.lon, first.lat, first.lon, first.lat];
        for p in &self.points[1..] {
            bbox[0] = bbox[0].min(p.lon);
            bbox[1] = bbox[1].min(p.lat);
            bbox[2] = bbox[2].max(p.lon);
            bbox[3] = bbox[3].max(p.lat);
        }
        Some(bbox)
    }
}

/// A typed routing error with optional structured detail fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default)]
    pub details: Map<String, Value>,
}

impl RouteError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Map::new(),
        }
    }

    pub fn point_not_found(message: impl Into<String>, point_index: usize) -> Self {
        Self::new(ErrorKind::PointNotFound, message).with_detail("point_index", point_index)
    }

    pub fn engine_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EngineFailure, message)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Result of one engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// Best path first, then alternatives.
    Success {
        paths: Vec<ResponsePath>,
        debug: Map<String, Value>,
    },
    Failure { errors: Vec<RouteError> },
}

/// Coarse classification of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeClass {
    Routed,
    PointNotFound,
    Failed,
}

impl RouteOutcome {
    pub fn success(paths: Vec<ResponsePath>) -> Self {
        RouteOutcome::Success {
            paths,
            debug: Map::new(),
        }
    }

    pub fn failure(error: RouteError) -> Self {
        RouteOutcome::Failure {
            errors: vec![error],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RouteOutcome::Success { .. })
    }

    pub fn class(&self) -> OutcomeClass {
        match self {
            RouteOutcome::Success { .. } => OutcomeClass::Routed,
            RouteOutcome::Failure { errors }
                if errors.iter().any(|e| e.kind == ErrorKind::PointNotFound) =>
            {
                OutcomeClass::PointNotFound
            }
            RouteOutcome::Failure { .. } => OutcomeClass::Failed,
        }
    }

    pub fn best(&self) -> Option<&ResponsePath> {
        match self {
            RouteOutcome::Success { paths, .. } => paths.first(),
            RouteOutcome::Failure { .. } => None,
        }
    }

    pub fn errors(&self) -> &[RouteError] {
        match self {
            RouteOutcome::Success { .. } => &[],
            RouteOutcome::Failure { errors } => errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_spans_all_points() {
        let path = ResponsePath {
            points: vec![
                PathPoint::new(52.5, 13.4),
                PathPoint::new(52.4, 13.6),
                PathPoint::new(52.6, 13.5),
            ],
            ..Default::default()
        };
        assert_eq!(path.bbox(), Some([13.4, 52.4, 13.6, 52.6]));
        assert_eq!(ResponsePath::default().bbox(), None);
    }

    #[test]
    fn test_outcome_classification() {
        assert_eq!(
            RouteOutcome::success(vec![ResponsePath::default()]).class(),
            OutcomeClass::Routed
        );
        assert_eq!(
            RouteOutcome::failure(RouteError::point_not_found("Cannot find point 0", 0)).class(),
            OutcomeClass::PointNotFound
        );
        assert_eq!(
            RouteOutcome::failure(RouteError::engine_failure("Connection between locations not found"))
                .class(),
            OutcomeClass::Failed
        );
    }
}
