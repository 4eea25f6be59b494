//! # Types Module
//!
//! Value types shared by every stage of the orchestrator. All of them live
//! for one request/response cycle and are never shared across requests.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`GeoPoint`] | Requested coordinate (lat, lon) |
//! | [`PathPoint`] | Path coordinate with optional elevation |
//! | [`Hints`] / [`HintValue`] | Normalized key/value side channel |
//! | [`RoutingRequest`] | Canonical request handed to the engine |
//! | [`RouteRequestBody`] | JSON body of `POST /route` |
//! | [`RouteOutcome`] | Engine success (paths) or failure (typed errors) |
//! | [`BulkRequest`] / [`BulkResponse`] | Batch documents |

pub mod bulk;
pub mod hints;
pub mod outcome;
pub mod point;
pub mod request;

pub use bulk::{BulkInfo, BulkItemResult, BulkRequest, BulkResponse, BulkResultEntry, Destination};
pub use hints::{camel_case_to_underscore, canonical_number, HintValue, Hints};
pub use outcome::{
    sign, Instruction, OutcomeClass, PathDetail, ResponsePath, RouteError, RouteOutcome,
};
pub use point::{haversine_distance, GeoPoint, PathPoint};
pub use request::{RouteRequestBody, RoutingRequest};
