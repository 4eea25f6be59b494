//! # route-orchestrator
//!
//! Request orchestration in front of a routing engine: intake of query-string,
//! JSON and batch requests, hint normalization, profile resolution, engine
//! dispatch and response shaping as JSON, GPX or error documents.
//!
//! ## Overview
//!
//! The crate never computes a path. Path computation, profile selection and
//! optional request rewriting are collaborators behind traits
//! ([`engine::RoutingEngine`], [`profile::ProfileResolver`],
//! [`engine::RequestTransformer`]); everything between the wire and those
//! collaborators lives here.
//!
//! ```text
//! client input ─▶ hints ─▶ request builder ─▶ transformer ─▶ profile resolution
//!                                                                   │
//!            wire response ◀─ formatter ◀─ outcome ◀─ engine ◀──────┘
//! ```
//!
//! The batch endpoint runs the same pipeline once per destination and folds
//! the outcomes into one document without letting a single failure abort
//! the batch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use route_orchestrator::config::ServerConfig;
//! use route_orchestrator::engine::BeelineEngine;
//! use route_orchestrator::orchestrator::RouteOrchestrator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> route_orchestrator::Result<()> {
//!     let config = ServerConfig::default().with_env_overrides()?;
//!     let orchestrator = RouteOrchestrator::builder()
//!         .with_server_config(&config)
//!         .with_engine(Arc::new(BeelineEngine::new()))
//!         .build()?;
//!     route_orchestrator::server::run(&config, orchestrator).await
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Points, hints, requests, outcomes and batch documents |
//! | [`request`] | Query parsing, hint normalization, request building |
//! | [`profile`] | Profile resolution and legacy hint stripping |
//! | [`engine`] | Engine and transformer traits, reference engine |
//! | [`format`] | JSON, GPX and error document rendering |
//! | [`bulk`] | Batch validation and ordered fan-out |
//! | [`orchestrator`] | The end-to-end pipeline |
//! | [`server`] | `axum` HTTP surface |
//! | [`config`] | YAML and environment configuration |
//! | [`telemetry`] | `tracing` setup and request logging |

pub mod bulk;
pub mod config;
pub mod engine;
pub mod error_code;
pub mod format;
pub mod orchestrator;
pub mod profile;
pub mod request;
pub mod server;
pub mod telemetry;
pub mod types;

// Re-export main types for convenience
pub use config::{OrchestratorConfig, ServerConfig};
pub use engine::{RequestTransformer, RoutingEngine};
pub use error_code::ErrorKind;
pub use orchestrator::{OrchestratorBuilder, RouteOrchestrator, RouteReply};
pub use profile::ProfileResolver;
pub use types::{GeoPoint, Hints, RouteOutcome, RoutingRequest};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
