//! # Response Formatting
//!
//! Renders a [`RouteOutcome`](crate::types::RouteOutcome) into exactly one wire shape.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`json`] | Success envelope with paths, info block and elapsed time |
//! | [`gpx`] | GPX 1.1 track document, single path only |
//! | [`error`] | JSON and XML error documents |
//! | [`polyline`] | Encoded polyline writer |

pub mod error;
pub mod gpx;
pub mod json;
pub mod polyline;

pub use error::{render_error, render_json_error, render_xml_error};
pub use gpx::render_gpx;
pub use json::render_json;
pub use polyline::encode_polyline;

/// Requested output type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Gpx,
    Xml,
}

impl OutputFormat {
    /// `gpx` and `xml` (any case) select the XML family; anything else is JSON.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("gpx") => OutputFormat::Gpx,
            Some(s) if s.eq_ignore_ascii_case("xml") => OutputFormat::Xml,
            _ => OutputFormat::Json,
        }
    }

    pub fn is_xml(&self) -> bool {
        !matches!(self, OutputFormat::Json)
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Gpx => "application/gpx+xml",
            OutputFormat::Xml => "application/xml",
        }
    }
}

/// GPX-only switches.
#[derive(Debug, Clone, PartialEq)]
pub struct GpxOptions {
    pub with_route: bool,
    pub with_track: bool,
    pub with_waypoints: bool,
    pub track_name: String,
    /// Track start time in epoch milliseconds; wall clock when absent.
    pub time_millis: Option<i64>,
}

impl Default for GpxOptions {
    fn default() -> Self {
        Self {
            with_route: true,
            with_track: true,
            with_waypoints: false,
            track_name: "GraphHopper Track".to_string(),
            time_millis: None,
        }
    }
}

/// How one response is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub instructions: bool,
    pub calc_points: bool,
    pub elevation: bool,
    pub points_encoded: bool,
    pub points_encoded_multiplier: f64,
    pub gpx: GpxOptions,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            instructions: true,
            calc_points: true,
            elevation: false,
            points_encoded: true,
            points_encoded_multiplier: 1e5,
            gpx: GpxOptions::default(),
        }
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
