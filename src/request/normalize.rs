//! Hint normalization: raw parameter sources into [`Hints`].

use super::params::ParamMap;
use crate::types::{HintValue, Hints};
use serde_json::{Map, Value};
use tracing::debug;

/// Builds hints from query parameters.
///
/// Each key with exactly one value is normalized and coerced. Keys that
/// occur several times are skipped: repeated parameters such as `point` are
/// consumed structurally by the request builder, and repeated unknown
/// parameters are currently dropped.
pub fn init_hints(params: &ParamMap) -> Hints {
    let mut hints = Hints::new();
    for (key, values) in params.iter() {
        match values {
            [single] => {
                hints.put_raw(key, single);
            }
            _ => {
                // TODO: decide whether repeated unknown hints should become list
                // values or be rejected with an invalid-argument error.
                debug!(key, count = values.len(), "skipping multi-valued parameter");
            }
        }
    }
    hints
}

/// Builds hints from the unrecognized top-level keys of a JSON body.
///
/// Only scalar values become hints; `null`, arrays and objects are skipped.
pub fn hints_from_json(extra: &Map<String, Value>) -> Hints {
    let mut hints = Hints::new();
    for (key, value) in extra {
        match HintValue::from_json(value) {
            Some(v) => {
                hints.put(key, v);
            }
            None => debug!(key = key.as_str(), "skipping non-scalar hint"),
        }
    }
    hints
}
