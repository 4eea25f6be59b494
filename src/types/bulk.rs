//! Batch request and response documents.

use super::point::GeoPoint;
use serde::{Deserialize, Deserializer, Serialize};

/// A batch target with the caller's correlation identifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Destination {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "destinationPoint")]
    pub point: GeoPoint,
}

impl Destination {
    pub fn new(id: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            id: id.into(),
            point,
        }
    }
}

/// JSON body of `POST /route/bulk`.
///
/// Both fields are optional at the wire level so structural problems are
/// reported as invalid arguments instead of deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BulkRequest {
    #[serde(rename = "originPoint", default)]
    pub origin: Option<GeoPoint>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

impl BulkRequest {
    pub fn new(origin: GeoPoint, destinations: Vec<Destination>) -> Self {
        Self {
            origin: Some(origin),
            destinations,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Unsigned(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(i) => i.to_string(),
        Id::Unsigned(u) => u.to_string(),
    })
}

/// Per-destination result payload; flattened next to the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BulkItemResult {
    Routed {
        /// meters, 3 decimals
        distance: f64,
        /// milliseconds
        time: u64,
    },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkResultEntry {
    pub id: String,
    #[serde(flatten)]
    pub result: BulkItemResult,
}

impl BulkResultEntry {
    pub fn routed(id: impl Into<String>, distance: f64, time: u64) -> Self {
        Self {
            id: id.into(),
            result: BulkItemResult::Routed { distance, time },
        }
    }

    pub fn failed(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            result: BulkItemResult::Failed {
                error: error.into(),
            },
        }
    }

    pub fn is_routed(&self) -> bool {
        matches!(self.result, BulkItemResult::Routed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkInfo {
    pub copyrights: Vec<String>,
}

/// Aggregated batch document: one entry per destination, in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkResponse {
    pub info: BulkInfo,
    pub data: Vec<BulkResultEntry>,
}
