//! Request assembly: typed parameters plus hints into a [`RoutingRequest`].

use super::normalize::{hints_from_json, init_hints};
use super::params::ParamMap;
use crate::config::OrchestratorConfig;
use crate::format::{GpxOptions, OutputFormat, OutputOptions};
use crate::types::{GeoPoint, Hints, RouteRequestBody, RoutingRequest};
use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

pub const CALC_POINTS: &str = "calc_points";
pub const INSTRUCTIONS: &str = "instructions";
pub const WAY_POINT_MAX_DISTANCE: &str = "way_point_max_distance";
pub const ELEVATION_WAY_POINT_MAX_DISTANCE: &str = "elevation_way_point_max_distance";
pub const SNAP_PREVENTION: &str = "snap_prevention";

const DEFAULT_WAY_POINT_MAX_DISTANCE: f64 = 0.5;
const DEFAULT_POINTS_ENCODED_MULTIPLIER: f64 = 1e5;
const MAX_POINTS_ENCODED_MULTIPLIER: f64 = 1e9;
const DEFAULT_TRACK_NAME: &str = "GraphHopper Track";
const DEFAULT_BULK_PROFILE: &str = "car";

/// Query keys consumed into typed request fields or output options.
///
/// They are removed from the hints so a GET request and an equivalent JSON
/// body dispatch the same hints.
static STRUCTURAL_QUERY_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "point",
        "profile",
        "type",
        "algorithm",
        "locale",
        "point_hint",
        "curbside",
        SNAP_PREVENTION,
        "details",
        "path_details",
        "heading",
        "gpx.route",
        "gpx.track",
        "gpx.waypoints",
        "gpx.trackname",
        "gpx.millis",
    ]
    .into_iter()
    .collect()
});

/// A request ready for profile resolution, plus how to render its result.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRequest {
    pub request: RoutingRequest,
    pub output: OutputOptions,
    /// Profile name as the caller sent it, when resolution must see that
    /// name rather than whatever a transformer assigned.
    pub requested_profile: Option<String>,
}

/// Settings shared by every destination of one batch call.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkParams {
    pub format: OutputFormat,
    pub profile: String,
    pub algorithm: String,
    pub locale: String,
    pub path_details: Vec<String>,
    pub hints: Hints,
}

/// Resolves the snap-prevention list.
///
/// - key absent: the configured default
/// - exactly one empty value: an explicitly empty list
/// - otherwise: the supplied values verbatim
pub fn resolve_snap_preventions(supplied: Option<&[String]>, default: &[String]) -> Vec<String> {
    match supplied {
        None => default.to_vec(),
        Some([only]) if only.is_empty() => Vec::new(),
        Some(values) => values.to_vec(),
    }
}

pub struct RequestBuilder<'a> {
    config: &'a OrchestratorConfig,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a OrchestratorConfig) -> Self {
        Self { config }
    }

    /// Builds a request from `GET /route` query parameters.
    pub fn from_query(&self, params: &ParamMap) -> Result<BuiltRequest> {
        let points = parse_points(params.all("point"))?;
        let format = OutputFormat::from_param(params.first("type"));
        let calc_points = params.bool_or(CALC_POINTS, true)?;
        // GPX needs the instructions for its route and waypoint sections.
        let instructions = format.is_xml() || params.bool_or(INSTRUCTIONS, true)?;
        let elevation = params.bool_or("elevation", false)?;
        self.check_elevation(elevation)?;

        let way_point_max_distance =
            params.f64_or(WAY_POINT_MAX_DISTANCE, DEFAULT_WAY_POINT_MAX_DISTANCE)?;
        let elevation_max_distance = params.f64_opt(ELEVATION_WAY_POINT_MAX_DISTANCE)?;

        let mut hints = init_hints(params);
        strip_structural_keys(&mut hints);
        if let Some(d) = elevation_max_distance {
            hints.put(ELEVATION_WAY_POINT_MAX_DISTANCE, d);
        }
        hints
            .put(CALC_POINTS, calc_points)
            .put(INSTRUCTIONS, instructions)
            .put(WAY_POINT_MAX_DISTANCE, way_point_max_distance);

        let mut path_details = params.all("details").to_vec();
        path_details.extend_from_slice(params.all("path_details"));

        let request = RoutingRequest {
            points,
            profile: params.string_or("profile", ""),
            algorithm: params.string_or("algorithm", ""),
            locale: params.string_or("locale", "en"),
            headings: params.f64_all("heading")?,
            point_hints: params.all("point_hint").to_vec(),
            curbsides: params.all("curbside").to_vec(),
            snap_preventions: resolve_snap_preventions(
                params.values(SNAP_PREVENTION),
                &self.config.snap_preventions_default,
            ),
            path_details,
            custom_model: None,
            hints,
        };
        validate_alignment(&request)?;

        let output = OutputOptions {
            format,
            instructions,
            calc_points,
            elevation,
            points_encoded: params.bool_or("points_encoded", true)?,
            points_encoded_multiplier: check_multiplier(
                params.f64_or("points_encoded_multiplier", DEFAULT_POINTS_ENCODED_MULTIPLIER)?,
            )?,
            gpx: GpxOptions {
                with_route: params.bool_or("gpx.route", true)?,
                with_track: params.bool_or("gpx.track", true)?,
                with_waypoints: params.bool_or("gpx.waypoints", false)?,
                track_name: params.string_or("gpx.trackname", DEFAULT_TRACK_NAME),
                time_millis: parse_millis(params.first("gpx.millis"))?,
            },
        };
        Ok(BuiltRequest {
            requested_profile: Some(request.profile.clone()),
            request,
            output,
        })
    }

    /// Builds a request from a `POST /route` JSON body.
    pub fn from_body(&self, body: RouteRequestBody) -> Result<BuiltRequest> {
        if body.points.is_empty() {
            return Err(missing_points());
        }
        if let Some(idx) = body.points.iter().position(|p| !p.is_valid()) {
            return Err(Error::invalid_argument_with_context(
                format!("Point {} is invalid", idx),
                ErrorContext::new().with_field_path("points"),
            ));
        }

        let mut hints = hints_from_json(&body.extra);
        // Same defaults a query request writes explicitly.
        if !hints.contains(CALC_POINTS) {
            hints.put(CALC_POINTS, true);
        }
        if !hints.contains(INSTRUCTIONS) {
            hints.put(INSTRUCTIONS, true);
        }
        if !hints.contains(WAY_POINT_MAX_DISTANCE) {
            hints.put(WAY_POINT_MAX_DISTANCE, DEFAULT_WAY_POINT_MAX_DISTANCE);
        }

        let elevation = hints.get_bool("elevation", false);
        self.check_elevation(elevation)?;

        let output = OutputOptions {
            format: OutputFormat::Json,
            instructions: hints.get_bool(INSTRUCTIONS, true),
            calc_points: hints.get_bool(CALC_POINTS, true),
            elevation,
            points_encoded: hints.get_bool("points_encoded", true),
            points_encoded_multiplier: check_multiplier(
                hints.get_f64("points_encoded_multiplier", DEFAULT_POINTS_ENCODED_MULTIPLIER),
            )?,
            gpx: GpxOptions::default(),
        };

        let request = RoutingRequest {
            points: body.points,
            profile: body.profile.unwrap_or_default(),
            algorithm: body.algorithm.unwrap_or_default(),
            locale: body.locale.unwrap_or_else(|| "en".to_string()),
            headings: body.headings,
            point_hints: body.point_hints,
            curbsides: body.curbsides,
            snap_preventions: body
                .snap_preventions
                .unwrap_or_else(|| self.config.snap_preventions_default.clone()),
            path_details: body.details,
            custom_model: body.custom_model,
            hints,
        };
        validate_alignment(&request)?;
        Ok(BuiltRequest {
            request,
            output,
            requested_profile: None,
        })
    }

    /// Parses the query parameters of `POST /route/bulk`.
    pub fn bulk_params(&self, params: &ParamMap) -> Result<BulkParams> {
        let format = OutputFormat::from_param(params.first("type"));
        let instructions = format.is_xml() || params.bool_or(INSTRUCTIONS, true)?;
        let calc_points = params.bool_or(CALC_POINTS, true)?;
        let way_point_max_distance =
            params.f64_or(WAY_POINT_MAX_DISTANCE, DEFAULT_WAY_POINT_MAX_DISTANCE)?;

        let mut hints = init_hints(params);
        strip_structural_keys(&mut hints);
        hints
            .put(CALC_POINTS, calc_points)
            .put(INSTRUCTIONS, instructions)
            .put(WAY_POINT_MAX_DISTANCE, way_point_max_distance);

        let mut path_details = params.all("details").to_vec();
        path_details.extend_from_slice(params.all("path_details"));

        Ok(BulkParams {
            format,
            profile: params.string_or("profile", DEFAULT_BULK_PROFILE),
            algorithm: params.string_or("algorithm", ""),
            locale: params.string_or("locale", "en"),
            path_details,
            hints,
        })
    }

    /// One origin-destination request of a batch; the destination goes first.
    pub fn bulk_item(
        &self,
        shared: &BulkParams,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> RoutingRequest {
        RoutingRequest::new(vec![destination, origin])
            .with_profile(shared.profile.clone())
            .with_algorithm(shared.algorithm.clone())
            .with_locale(shared.locale.clone())
            .with_path_details(shared.path_details.clone())
            .with_snap_preventions(self.config.snap_preventions_default.clone())
            .with_hints(shared.hints.clone())
    }

    fn check_elevation(&self, requested: bool) -> Result<()> {
        if requested && !self.config.has_elevation {
            return Err(Error::invalid_argument_with_context(
                "Elevation not supported!",
                ErrorContext::new()
                    .with_field_path("elevation")
                    .with_source("request_builder"),
            ));
        }
        Ok(())
    }
}

fn strip_structural_keys(hints: &mut Hints) {
    let keys: Vec<String> = hints
        .keys()
        .filter(|k| STRUCTURAL_QUERY_KEYS.contains(*k))
        .map(str::to_string)
        .collect();
    for key in keys {
        hints.remove(&key);
    }
}

fn missing_points() -> Error {
    Error::invalid_argument_with_context(
        "You have to pass at least one point",
        ErrorContext::new()
            .with_field_path("point")
            .with_source("request_builder"),
    )
}

fn parse_points(raw: &[String]) -> Result<Vec<GeoPoint>> {
    if raw.is_empty() {
        return Err(missing_points());
    }
    raw.iter().map(|p| GeoPoint::parse(p)).collect()
}

/// The polyline multiplier must be a positive, finite scale of sane size.
fn check_multiplier(value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 && value <= MAX_POINTS_ENCODED_MULTIPLIER {
        return Ok(value);
    }
    Err(Error::invalid_argument_with_context(
        format!(
            "points_encoded_multiplier must be greater than 0 and at most {}, got {}",
            MAX_POINTS_ENCODED_MULTIPLIER, value
        ),
        ErrorContext::new()
            .with_field_path("points_encoded_multiplier")
            .with_source("request_builder"),
    ))
}

fn parse_millis(raw: Option<&str>) -> Result<Option<i64>> {
    raw.map(|s| {
        s.trim().parse::<i64>().map_err(|_| {
            Error::invalid_argument_with_context(
                format!("Cannot parse gpx.millis '{}'", s),
                ErrorContext::new().with_field_path("gpx.millis"),
            )
        })
    })
    .transpose()
}

/// Per-point lists must line up with the points.
fn validate_alignment(request: &RoutingRequest) -> Result<()> {
    let n = request.points.len();
    let headings = request.headings.len();
    if headings > 1 && headings != n {
        return Err(Error::invalid_argument_with_context(
            "The number of 'heading' parameters must be zero, one or equal to the number of points",
            ErrorContext::new().with_field_path("heading"),
        ));
    }
    if !request.point_hints.is_empty() && request.point_hints.len() != n {
        return Err(Error::invalid_argument_with_context(
            "If you pass point_hint, you need to pass exactly one hint for every point, empty hints will be ignored",
            ErrorContext::new().with_field_path("point_hint"),
        ));
    }
    if !request.curbsides.is_empty() && request.curbsides.len() != n {
        return Err(Error::invalid_argument_with_context(
            "If you pass curbside, you need to pass exactly one curbside for every point, empty curbsides will be ignored",
            ErrorContext::new().with_field_path("curbside"),
        ));
    }
    Ok(())
}
