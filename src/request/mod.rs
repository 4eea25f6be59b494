//! # Request Intake
//!
//! Turns heterogeneous client input into a canonical [`RoutingRequest`](crate::types::RoutingRequest).
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ParamMap`] | Multi-valued query parameters |
//! | [`init_hints`] | Hint normalizer for query parameters |
//! | [`hints_from_json`] | Hint normalizer for JSON body extras |
//! | [`RequestBuilder`] | Assembles requests for GET, POST and batch items |
//! | [`resolve_snap_preventions`] | Absent / explicit-empty / verbatim policy |

pub mod builder;
pub mod normalize;
pub mod params;

pub use builder::{resolve_snap_preventions, BuiltRequest, BulkParams, RequestBuilder};
pub use normalize::{hints_from_json, init_hints};
pub use params::ParamMap;
