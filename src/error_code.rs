//! Routing error kinds and their stable wire identifiers.
//!
//! Every failure that reaches a client is classified into one of three kinds.
//! The identifier returned by [`ErrorKind::name`] is what error documents put
//! into the `details` field of each error entry, so it must never change.
//!
//! | Code  | Name               | Meaning                                          |
//! |-------|--------------------|--------------------------------------------------|
//! | E1001 | `invalid_argument` | Malformed or missing input, unsupported format   |
//! | E1004 | `point_not_found`  | A coordinate could not be snapped to the network |
//! | E3001 | `engine_failure`   | Opaque failure surfaced by the routing engine    |
//!
//! ## Example
//!
//! ```rust
//! use route_orchestrator::error_code::ErrorKind;
//!
//! let kind = ErrorKind::from_name("point_not_found").unwrap();
//! assert_eq!(kind.code(), "E1004");
//! assert_eq!(kind.http_status(), 400);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// E1001: malformed/missing required input, unsupported format combination
    InvalidArgument,
    /// E1004: a point could not be snapped to the routable network
    PointNotFound,
    /// E3001: engine-internal error, no path found, invalid profile
    EngineFailure,
}

impl ErrorKind {
    /// Returns the canonical code string (e.g., `"E1001"`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "E1001",
            Self::PointNotFound => "E1004",
            Self::EngineFailure => "E3001",
        }
    }

    /// Returns the stable type identifier (e.g., `"invalid_argument"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::PointNotFound => "point_not_found",
            Self::EngineFailure => "engine_failure",
        }
    }

    /// HTTP status used by the single-route endpoints.
    ///
    /// All routing failures are reported as a bad request, including engine
    /// failures such as "connection not found".
    #[inline]
    pub fn http_status(&self) -> u16 {
        400
    }

    /// Maps a type identifier back to its kind. Accepts a few aliases that
    /// engines commonly use for the same condition.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "invalid_argument" | "illegal_argument" | "invalid_request" => Self::InvalidArgument,
            "point_not_found" | "point_out_of_bounds" => Self::PointNotFound,
            "engine_failure" | "connection_not_found" | "maximum_nodes_exceeded" => {
                Self::EngineFailure
            }
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in [
            ErrorKind::InvalidArgument,
            ErrorKind::PointNotFound,
            ErrorKind::EngineFailure,
        ] {
            assert_eq!(ErrorKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(
            ErrorKind::from_name("connection_not_found"),
            Some(ErrorKind::EngineFailure)
        );
        assert_eq!(
            ErrorKind::from_name("point_out_of_bounds"),
            Some(ErrorKind::PointNotFound)
        );
        assert_eq!(ErrorKind::from_name("whatever"), None);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&ErrorKind::PointNotFound).unwrap();
        assert_eq!(json, "\"point_not_found\"");
    }
}
