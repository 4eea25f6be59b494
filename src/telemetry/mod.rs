//! # Telemetry
//!
//! Structured request logging on top of `tracing`.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`init_tracing`] | Installs the fmt subscriber with an `EnvFilter` |
//! | [`RouteSummary`] | What the pipeline did for one request |
//! | [`RequestLog`] | Summary plus caller identity and timing |
//! | [`log_request`] | Emits one event per handled request |

use crate::{Error, ErrorContext, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Installs a global fmt subscriber. `RUST_LOG` wins over `default_directive`.
pub fn init_tracing(default_directive: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| {
            Error::configuration_with_context(
                e.to_string(),
                ErrorContext::new().with_source("telemetry"),
            )
        })
}

/// Pipeline-side facts about one routed request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteSummary {
    pub points: usize,
    pub algorithm: String,
    pub profile: String,
    pub result: RouteResultSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteResultSummary {
    Routed {
        alternatives: usize,
        distance: f64,
        weight: f64,
        /// milliseconds
        time: u64,
        points: usize,
        debug: String,
    },
    Batch {
        destinations: usize,
        routed: usize,
        failed: usize,
    },
    Failed {
        messages: Vec<String>,
    },
}

impl Default for RouteResultSummary {
    fn default() -> Self {
        RouteResultSummary::Failed {
            messages: Vec::new(),
        }
    }
}

/// One handled request, as logged.
#[derive(Debug, Clone)]
pub struct RequestLog {
    pub request_id: Uuid,
    pub endpoint: &'static str,
    pub remote_addr: String,
    pub user_agent: String,
    pub took_ms: u64,
    pub summary: RouteSummary,
}

impl RequestLog {
    pub fn new(endpoint: &'static str, summary: RouteSummary) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            endpoint,
            remote_addr: String::new(),
            user_agent: String::new(),
            took_ms: 0,
            summary,
        }
    }

    pub fn with_caller(mut self, remote_addr: impl Into<String>, user_agent: impl Into<String>) -> Self {
        self.remote_addr = remote_addr.into();
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_took(mut self, took_ms: u64) -> Self {
        self.took_ms = took_ms;
        self
    }
}

pub fn log_request(log: &RequestLog) {
    let s = &log.summary;
    match &s.result {
        RouteResultSummary::Routed {
            alternatives,
            distance,
            weight,
            time,
            points,
            debug: debug_info,
        } => info!(
            request_id = %log.request_id,
            endpoint = log.endpoint,
            remote_addr = %log.remote_addr,
            user_agent = %log.user_agent,
            points = s.points,
            took_ms = log.took_ms,
            algorithm = %s.algorithm,
            profile = %s.profile,
            alternatives = *alternatives,
            distance0 = *distance,
            weight0 = *weight,
            time0_min = *time / 60_000,
            points0 = *points,
            debug = %debug_info,
            "route request"
        ),
        RouteResultSummary::Batch {
            destinations,
            routed,
            failed,
        } => info!(
            request_id = %log.request_id,
            endpoint = log.endpoint,
            remote_addr = %log.remote_addr,
            user_agent = %log.user_agent,
            points = s.points,
            took_ms = log.took_ms,
            algorithm = %s.algorithm,
            profile = %s.profile,
            destinations = *destinations,
            routed = *routed,
            failed = *failed,
            "bulk request"
        ),
        RouteResultSummary::Failed { messages } => warn!(
            request_id = %log.request_id,
            endpoint = log.endpoint,
            remote_addr = %log.remote_addr,
            user_agent = %log.user_agent,
            points = s.points,
            took_ms = log.took_ms,
            algorithm = %s.algorithm,
            profile = %s.profile,
            errors = ?messages,
            "route request failed"
        ),
    }
}
