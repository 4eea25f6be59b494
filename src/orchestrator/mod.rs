//! # Orchestrator
//!
//! Wires request intake, profile resolution, engine dispatch and formatting
//! into the three public operations.
//!
//! | Operation | Entry point |
//! |-----------|-------------|
//! | `GET /route` | [`RouteOrchestrator::route_get`] |
//! | `POST /route` | [`RouteOrchestrator::route_post`] |
//! | `POST /route/bulk` | [`RouteOrchestrator::route_bulk`] |
//!
//! Single-route calls return 200 or a 400 error document. The batch call
//! returns 400 only for structural problems.
//!
//! ## Example
//!
//! ```rust
//! use route_orchestrator::engine::BeelineEngine;
//! use route_orchestrator::orchestrator::RouteOrchestrator;
//! use route_orchestrator::request::ParamMap;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let orchestrator = RouteOrchestrator::builder()
//!     .with_engine(Arc::new(BeelineEngine::new()))
//!     .build()
//!     .unwrap();
//! let params = ParamMap::from_query("point=52.5,13.4&point=52.6,13.5&profile=car");
//! let reply = orchestrator.route_get(&params).await;
//! assert_eq!(reply.status, 200);
//! # });
//! ```

mod builder;
mod core;

pub use builder::OrchestratorBuilder;
pub use self::core::{RouteOrchestrator, RouteReply};
