//! Free-form routing hints with normalized keys and typed scalar values.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// A dynamically typed hint value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HintValue {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl HintValue {
    /// Coerces a raw parameter value to its most specific scalar type.
    ///
    /// `true`/`false` (any case) become booleans, integer and then float
    /// literals become numbers, everything else stays a string. Never fails.
    /// Numbers are stored canonically, see [`canonical_number`].
    pub fn coerce(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            return HintValue::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return HintValue::Bool(false);
        }
        if let Ok(i) = raw.parse::<i64>() {
            return HintValue::Number(Number::from(i));
        }
        if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            // Rust accepts "inf"/"NaN"; from_f64 rejects them, so they stay text.
            return HintValue::Number(canonical_number(n));
        }
        HintValue::Text(raw.to_string())
    }

    /// Converts a JSON body value. Only scalars qualify.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(HintValue::Bool(*b)),
            Value::Number(n) => Some(HintValue::Number(canonical_number(n.clone()))),
            Value::String(s) => Some(HintValue::Text(s.clone())),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HintValue::Bool(b) => Some(*b),
            HintValue::Text(s) if s.eq_ignore_ascii_case("true") => Some(true),
            HintValue::Text(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HintValue::Number(n) => n.as_f64(),
            HintValue::Text(s) => s.trim().parse().ok(),
            HintValue::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HintValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for HintValue {
    fn from(b: bool) -> Self {
        HintValue::Bool(b)
    }
}

impl From<f64> for HintValue {
    fn from(f: f64) -> Self {
        Number::from_f64(f)
            .map(|n| HintValue::Number(canonical_number(n)))
            .unwrap_or_else(|| HintValue::Text(f.to_string()))
    }
}

impl From<i64> for HintValue {
    fn from(i: i64) -> Self {
        HintValue::Number(Number::from(i))
    }
}

impl From<&str> for HintValue {
    fn from(s: &str) -> Self {
        HintValue::Text(s.to_string())
    }
}

impl From<String> for HintValue {
    fn from(s: String) -> Self {
        HintValue::Text(s)
    }
}

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Integral floats become integers so `1`, `1.0` and `1e0` compare equal
/// whichever source they came from.
pub fn canonical_number(n: Number) -> Number {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER {
                return Number::from(f as i64);
            }
        }
    }
    n
}

/// Converts camel-case segment boundaries to underscores: `pointHint` → `point_hint`.
///
/// Every uppercase letter becomes `_` plus its lowercase form, so an
/// already underscored key is left untouched.
pub fn camel_case_to_underscore(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Key/value side channel of a routing request.
///
/// Keys are normalized on every insert and lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hints {
    map: BTreeMap<String, HintValue>,
}

impl Hints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: &str, value: impl Into<HintValue>) -> &mut Self {
        self.map.insert(camel_case_to_underscore(key), value.into());
        self
    }

    pub fn with(mut self, key: &str, value: impl Into<HintValue>) -> Self {
        self.put(key, value);
        self
    }

    /// Inserts a raw string value after coercing it.
    pub fn put_raw(&mut self, key: &str, raw: &str) -> &mut Self {
        self.put(key, HintValue::coerce(raw))
    }

    pub fn get(&self, key: &str) -> Option<&HintValue> {
        self.map.get(&camel_case_to_underscore(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<HintValue> {
        self.map.remove(&camel_case_to_underscore(key))
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(HintValue::as_bool).unwrap_or(default)
    }

    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(HintValue::as_f64).unwrap_or(default)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(HintValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HintValue)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copies every entry of `other` into `self`, overwriting on conflict.
    pub fn extend_from(&mut self, other: &Hints) {
        for (k, v) in &other.map {
            self.map.insert(k.clone(), v.clone());
        }
    }
}
