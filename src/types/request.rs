//! Canonical routing request and the JSON body it can be built from.

use super::hints::Hints;
use super::point::GeoPoint;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The request dispatched to the routing engine.
///
/// Built once per inbound call; after construction only `profile` changes,
/// during profile resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoutingRequest {
    pub points: Vec<GeoPoint>,
    /// Empty until resolved.
    pub profile: String,
    /// Empty selects the engine default.
    pub algorithm: String,
    pub locale: String,
    pub headings: Vec<f64>,
    pub point_hints: Vec<String>,
    pub curbsides: Vec<String>,
    /// Road-class tags snapping must avoid. Empty means "no restriction".
    pub snap_preventions: Vec<String>,
    pub path_details: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_model: Option<Value>,
    pub hints: Hints,
}

impl RoutingRequest {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self {
            points,
            locale: "en".to_string(),
            ..Default::default()
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_path_details(mut self, details: Vec<String>) -> Self {
        self.path_details = details;
        self
    }

    pub fn with_snap_preventions(mut self, snap_preventions: Vec<String>) -> Self {
        self.snap_preventions = snap_preventions;
        self
    }

    pub fn with_hints(mut self, hints: Hints) -> Self {
        self.hints = hints;
        self
    }

    pub fn has_curbsides(&self) -> bool {
        !self.curbsides.is_empty()
    }
}

/// JSON body accepted by `POST /route`.
///
/// Recognized fields are typed; every other top-level key is a hint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteRequestBody {
    #[serde(default)]
    pub points: Vec<GeoPoint>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub headings: Vec<f64>,
    #[serde(default)]
    pub point_hints: Vec<String>,
    #[serde(default)]
    pub curbsides: Vec<String>,
    /// `None` when the key is absent, which selects the configured default.
    #[serde(default)]
    pub snap_preventions: Option<Vec<String>>,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub custom_model: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
