//! # Bulk Fan-out
//!
//! Splits one origin and N destinations into N independent route requests
//! and folds their outcomes back into one document, in destination order.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`validate`] | Structural checks; the only way a batch call fails |
//! | [`BatchExecutor`] | Sequential or bounded concurrent ordered execution |
//! | [`result_entry`] | Outcome of one destination into a result entry |
//! | [`BulkSummary`] | Counts per outcome class, for logging |
//!
//! Each destination moves from pending to exactly one of routed, point not
//! found or failed. The last two are reported inside the document.

pub mod executor;

pub use executor::{BatchExecutor, BatchRun, BatchStrategy};

use crate::format::round_to;
use crate::types::{BulkRequest, Destination, GeoPoint, OutcomeClass, RouteOutcome, BulkResultEntry};
use crate::{Error, ErrorContext, Result};

/// Checks the batch structure and returns the origin plus destinations.
pub fn validate(request: &BulkRequest) -> Result<(GeoPoint, &[Destination])> {
    let invalid = |msg: &str, field: &str| {
        Error::invalid_argument_with_context(
            msg,
            ErrorContext::new()
                .with_field_path(field)
                .with_source("bulk"),
        )
    };
    let origin = match (request.origin, request.destinations.is_empty()) {
        (None, true) => return Err(invalid("You have to pass at least one point", "originPoint")),
        (_, true) => return Err(invalid("You have to pass at least destination", "destinations")),
        (None, false) => return Err(invalid("You have to pass the originPoint", "originPoint")),
        (Some(origin), false) => origin,
    };
    if !origin.is_valid() {
        return Err(invalid("The originPoint is invalid", "originPoint"));
    }
    if let Some(idx) = request.destinations.iter().position(|d| !d.point.is_valid()) {
        return Err(invalid(
            &format!("The destinationPoint of destination {} is invalid", idx),
            "destinations",
        ));
    }
    Ok((origin, &request.destinations))
}

/// The entry reported for one destination. Only the best path counts.
pub fn result_entry(id: &str, outcome: &RouteOutcome) -> BulkResultEntry {
    match outcome {
        RouteOutcome::Success { .. } => match outcome.best() {
            Some(best) => BulkResultEntry::routed(id, round_to(best.distance, 3), best.time),
            None => BulkResultEntry::failed(id, "Connection between locations not found"),
        },
        RouteOutcome::Failure { errors } => {
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            BulkResultEntry::failed(id, messages.join("; "))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSummary {
    pub routed: usize,
    pub point_not_found: usize,
    pub failed: usize,
}

impl BulkSummary {
    pub fn record(&mut self, class: OutcomeClass) {
        match class {
            OutcomeClass::Routed => self.routed += 1,
            OutcomeClass::PointNotFound => self.point_not_found += 1,
            OutcomeClass::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.routed + self.point_not_found + self.failed
    }
}
