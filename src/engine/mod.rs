//! # Routing Engine Seam
//!
//! The orchestrator never computes paths itself. It hands a finished
//! [`RoutingRequest`] to a [`RoutingEngine`] and classifies what comes back.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`RoutingEngine`] | Path computation contract |
//! | [`RequestTransformer`] | Optional rewrite applied right after request construction |
//! | [`invoke`] | Engine call plus outcome classification |
//! | [`BeelineEngine`] | Straight-line reference engine |

pub mod beeline;

pub use beeline::BeelineEngine;

use crate::types::{RouteError, RouteOutcome, RoutingRequest};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Engine property holding the date of the imported road data.
pub const DATA_DATE_PROPERTY: &str = "datareader.data.date";

#[async_trait]
pub trait RoutingEngine: Send + Sync {
    /// Computes paths for one request. Failures are values, not errors.
    async fn route(&self, request: &RoutingRequest) -> RouteOutcome;

    /// Static engine metadata, read once at startup.
    fn properties(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Whether `route` may be called concurrently from one batch.
    fn supports_concurrent_routing(&self) -> bool {
        false
    }
}

/// Rewrites a request before profile resolution.
pub trait RequestTransformer: Send + Sync {
    fn transform(&self, request: RoutingRequest) -> RoutingRequest;
}

/// Leaves every request untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTransformer;

impl RequestTransformer for PassthroughTransformer {
    fn transform(&self, request: RoutingRequest) -> RoutingRequest {
        request
    }
}

/// Calls the engine once and normalizes degenerate outcomes.
///
/// A success without paths becomes an engine failure, as does a failure
/// that carries no error.
pub async fn invoke(engine: &dyn RoutingEngine, request: &RoutingRequest) -> RouteOutcome {
    let outcome = engine.route(request).await;
    let outcome = match outcome {
        RouteOutcome::Success { paths, .. } if paths.is_empty() => {
            RouteOutcome::failure(RouteError::engine_failure("Connection between locations not found"))
        }
        RouteOutcome::Failure { errors } if errors.is_empty() => {
            RouteOutcome::failure(RouteError::engine_failure("Routing failed without an error message"))
        }
        other => other,
    };
    debug!(
        profile = %request.profile,
        points = request.points.len(),
        class = ?outcome.class(),
        "engine call finished"
    );
    outcome
}
