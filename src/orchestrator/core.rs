use crate::bulk::{self, BatchExecutor, BatchStrategy, BulkSummary};
use crate::config::OrchestratorConfig;
use crate::engine::{self, RequestTransformer, RoutingEngine};
use crate::format::{self, OutputFormat, OutputOptions};
use crate::profile::{self, ProfileResolver};
use crate::request::{BuiltRequest, ParamMap, RequestBuilder};
use crate::telemetry::{RouteResultSummary, RouteSummary};
use crate::types::{
    BulkInfo, BulkRequest, BulkResponse, RouteError, RouteOutcome, RouteRequestBody,
    RoutingRequest,
};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Rendered answer of one orchestrator call, ready for the HTTP layer.
#[derive(Debug, Clone)]
pub struct RouteReply {
    pub status: u16,
    pub format: OutputFormat,
    pub content_type: &'static str,
    pub body: String,
    pub took_ms: u64,
    pub summary: RouteSummary,
}

impl RouteReply {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// GPX and XML successes are served as a file download.
    pub fn attachment_name(&self) -> Option<&'static str> {
        (self.is_success() && self.format.is_xml()).then_some("GraphHopper.gpx")
    }
}

/// Runs the intake, resolution, dispatch and formatting pipeline.
///
/// Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct RouteOrchestrator {
    pub(crate) engine: Arc<dyn RoutingEngine>,
    pub(crate) resolver: Arc<dyn ProfileResolver>,
    pub(crate) transformer: Arc<dyn RequestTransformer>,
    pub(crate) config: Arc<OrchestratorConfig>,
}

impl RouteOrchestrator {
    pub fn builder() -> super::OrchestratorBuilder {
        super::OrchestratorBuilder::new()
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// `GET /route`
    pub async fn route_get(&self, params: &ParamMap) -> RouteReply {
        let start = Instant::now();
        let format = OutputFormat::from_param(params.first("type"));
        match RequestBuilder::new(&self.config).from_query(params) {
            Ok(built) => self.respond(built, start).await,
            Err(e) => {
                let summary = RouteSummary {
                    points: params.all("point").len(),
                    algorithm: params.string_or("algorithm", ""),
                    profile: params.string_or("profile", ""),
                    ..Default::default()
                };
                self.error_reply(format, &[e.to_route_error()], summary, start)
            }
        }
    }

    /// `POST /route`
    pub async fn route_post(&self, body: RouteRequestBody) -> RouteReply {
        let start = Instant::now();
        let summary = RouteSummary {
            points: body.points.len(),
            algorithm: body.algorithm.clone().unwrap_or_default(),
            profile: body.profile.clone().unwrap_or_default(),
            ..Default::default()
        };
        match RequestBuilder::new(&self.config).from_body(body) {
            Ok(built) => self.respond(built, start).await,
            Err(e) => self.error_reply(OutputFormat::Json, &[e.to_route_error()], summary, start),
        }
    }

    /// Renders an error raised before the pipeline ran, such as a malformed body.
    pub fn reject(&self, format: OutputFormat, error: &Error) -> RouteReply {
        self.error_reply(
            format,
            &[error.to_route_error()],
            RouteSummary::default(),
            Instant::now(),
        )
    }

    /// `POST /route/bulk`
    ///
    /// Fails only on structural problems; per-destination failures are
    /// reported inside the 200 document.
    pub async fn route_bulk(&self, params: &ParamMap, body: BulkRequest) -> RouteReply {
        let start = Instant::now();
        let builder = RequestBuilder::new(&self.config);
        let summary = RouteSummary {
            points: body.destinations.len() + usize::from(body.origin.is_some()),
            algorithm: params.string_or("algorithm", ""),
            profile: params.string_or("profile", "car"),
            ..Default::default()
        };
        let shared = match builder.bulk_params(params) {
            Ok(shared) => shared,
            Err(e) => {
                let format = OutputFormat::from_param(params.first("type"));
                return self.error_reply(format, &[e.to_route_error()], summary, start);
            }
        };
        let (origin, destinations) = match bulk::validate(&body) {
            Ok(v) => v,
            Err(e) => return self.error_reply(shared.format, &[e.to_route_error()], summary, start),
        };

        let strategy = BatchStrategy::for_engine(
            self.engine.supports_concurrent_routing(),
            self.config.max_bulk_concurrency,
        );
        let run = BatchExecutor::new(strategy)
            .execute(destinations.to_vec(), |_, destination| {
                let request = builder.bulk_item(&shared, origin, destination.point);
                async move {
                    let outcome = self.dispatch(request).await;
                    (destination.id, outcome)
                }
            })
            .await;

        let mut counts = BulkSummary::default();
        let data = run
            .results
            .iter()
            .map(|(id, outcome)| {
                counts.record(outcome.class());
                debug!(id = %id, class = ?outcome.class(), "bulk destination finished");
                bulk::result_entry(id, outcome)
            })
            .collect();
        let took_ms = elapsed_ms(start);
        info!(
            destinations = counts.total(),
            routed = counts.routed,
            point_not_found = counts.point_not_found,
            failed = counts.failed,
            strategy = ?strategy,
            took_ms,
            "bulk request finished"
        );

        let response = BulkResponse {
            info: BulkInfo {
                copyrights: self.config.bulk_copyrights.clone(),
            },
            data,
        };
        match serde_json::to_string(&response) {
            Ok(body) => RouteReply {
                status: 200,
                format: OutputFormat::Json,
                content_type: OutputFormat::Json.content_type(),
                body,
                took_ms,
                summary: RouteSummary {
                    result: RouteResultSummary::Batch {
                        destinations: counts.total(),
                        routed: counts.routed,
                        failed: counts.point_not_found + counts.failed,
                    },
                    ..summary
                },
            },
            Err(e) => {
                self.error_reply(OutputFormat::Json, &[Error::from(e).to_route_error()], summary, start)
            }
        }
    }

    /// Transform, resolve and route one request. Never fails: pipeline errors
    /// become a failed outcome.
    pub async fn dispatch(&self, request: RoutingRequest) -> RouteOutcome {
        match self.prepare(request, None) {
            Ok(request) => engine::invoke(self.engine.as_ref(), &request).await,
            Err(e) => RouteOutcome::failure(e.to_route_error()),
        }
    }

    /// Transformer first, then profile resolution. A `requested` name (GET)
    /// is what the resolver sees; otherwise the transformed profile is.
    fn prepare(&self, request: RoutingRequest, requested: Option<&str>) -> Result<RoutingRequest> {
        let mut request = self.transformer.transform(request);
        match requested {
            Some(name) => profile::resolve_requested_profile(self.resolver.as_ref(), &mut request, name)?,
            None => profile::resolve_profile(self.resolver.as_ref(), &mut request)?,
        }
        Ok(request)
    }

    async fn respond(&self, built: BuiltRequest, start: Instant) -> RouteReply {
        let BuiltRequest {
            request,
            output,
            requested_profile,
        } = built;
        let mut summary = RouteSummary {
            points: request.points.len(),
            algorithm: request.algorithm.clone(),
            profile: request.profile.clone(),
            ..Default::default()
        };
        let request = match self.prepare(request, requested_profile.as_deref()) {
            Ok(request) => request,
            Err(e) => return self.error_reply(output.format, &[e.to_route_error()], summary, start),
        };
        summary.profile = request.profile.clone();

        match engine::invoke(self.engine.as_ref(), &request).await {
            RouteOutcome::Success { paths, debug } => {
                let took_ms = elapsed_ms(start);
                match self.render_success(&paths, &debug, &output, took_ms) {
                    Ok(body) => {
                        if let Some(best) = paths.first() {
                            summary.result = RouteResultSummary::Routed {
                                alternatives: paths.len(),
                                distance: best.distance,
                                weight: best.weight,
                                time: best.time,
                                points: best.points.len(),
                                debug: serde_json::Value::Object(debug).to_string(),
                            };
                        }
                        RouteReply {
                            status: 200,
                            format: output.format,
                            content_type: output.format.content_type(),
                            body,
                            took_ms,
                            summary,
                        }
                    }
                    Err(e) => self.error_reply(output.format, &[e.to_route_error()], summary, start),
                }
            }
            RouteOutcome::Failure { errors } => self.error_reply(output.format, &errors, summary, start),
        }
    }

    fn render_success(
        &self,
        paths: &[crate::types::ResponsePath],
        debug: &serde_json::Map<String, serde_json::Value>,
        output: &OutputOptions,
        took_ms: u64,
    ) -> Result<String> {
        if output.format.is_xml() {
            format::render_gpx(paths, &output.gpx, output.elevation, &self.config.version)
        } else {
            Ok(format::render_json(paths, debug, output, &self.config, took_ms).to_string())
        }
    }

    fn error_reply(
        &self,
        format: OutputFormat,
        errors: &[RouteError],
        mut summary: RouteSummary,
        start: Instant,
    ) -> RouteReply {
        let (body, content_type) = format::render_error(errors, format);
        let status = errors.first().map(|e| e.kind.http_status()).unwrap_or(400);
        summary.result = RouteResultSummary::Failed {
            messages: errors.iter().map(|e| e.message.clone()).collect(),
        };
        RouteReply {
            status,
            format,
            content_type,
            body,
            took_ms: elapsed_ms(start),
            summary,
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
