//! Geographic points.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A requested coordinate: latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Parses the query syntax `lat,lon`.
    ///
    /// A third elevation component is tolerated and ignored.
    pub fn parse(raw: &str) -> Result<Self> {
        let fail = || {
            Error::invalid_argument_with_context(
                format!("Cannot parse point '{}'", raw),
                ErrorContext::new()
                    .with_field_path("point")
                    .with_details(raw)
                    .with_source("point_parser"),
            )
        };
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(fail());
        }
        let lat: f64 = parts[0].parse().map_err(|_| fail())?;
        let lon: f64 = parts[1].parse().map_err(|_| fail())?;
        let point = GeoPoint::new(lat, lon);
        if !point.is_valid() {
            return Err(fail());
        }
        Ok(point)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Input {
            // GeoJSON order: [lon, lat] or [lon, lat, ele]
            Coordinates(Vec<f64>),
            Obj { lat: f64, lon: f64 },
        }

        let point = match Input::deserialize(deserializer)? {
            Input::Coordinates(c) => {
                if c.len() < 2 || c.len() > 3 {
                    return Err(serde::de::Error::custom(format!(
                        "a point array needs [lon, lat], got {} values",
                        c.len()
                    )));
                }
                GeoPoint::new(c[1], c[0])
            }
            Input::Obj { lat, lon } => GeoPoint::new(lat, lon),
        };
        Ok(point)
    }
}

/// A point of a computed path, optionally carrying elevation in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ele: Option<f64>,
}

impl PathPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, ele: None }
    }

    pub fn with_ele(mut self, ele: f64) -> Self {
        self.ele = Some(ele);
        self
    }
}

impl From<GeoPoint> for PathPoint {
    fn from(p: GeoPoint) -> Self {
        PathPoint::new(p.lat, p.lon)
    }
}

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters.
pub fn haversine_distance(a: &PathPoint, b: &PathPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
