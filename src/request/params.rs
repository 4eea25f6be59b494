//! Multi-valued query parameter map.

use crate::{Error, ErrorContext, Result};
use std::collections::BTreeMap;

/// Query parameters as `key -> values`, values in order of appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query string.
    pub fn from_query(raw: &str) -> Self {
        let mut params = Self::new();
        for (k, v) in url::form_urlencoded::parse(raw.as_bytes()) {
            params.append(k.into_owned(), v.into_owned());
        }
        params
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.entry(key.into()).or_default().push(value.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All values of `key`, or `None` when the key never appeared.
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn all(&self, key: &str) -> &[String] {
        self.values(key).unwrap_or(&[])
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.first(key).unwrap_or(default).to_string()
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.first(key) {
            None => Ok(default),
            Some(raw) if raw.eq_ignore_ascii_case("true") => Ok(true),
            Some(raw) if raw.eq_ignore_ascii_case("false") => Ok(false),
            Some(raw) => Err(invalid_value(key, raw, "boolean")),
        }
    }

    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.f64_opt(key)? {
            Some(v) => Ok(v),
            None => Ok(default),
        }
    }

    pub fn f64_opt(&self, key: &str) -> Result<Option<f64>> {
        match self.first(key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| invalid_value(key, raw, "number")),
        }
    }

    /// Every value of `key` parsed as a number.
    pub fn f64_all(&self, key: &str) -> Result<Vec<f64>> {
        self.all(key)
            .iter()
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| invalid_value(key, raw, "number"))
            })
            .collect()
    }
}

fn invalid_value(key: &str, raw: &str, expected: &str) -> Error {
    Error::invalid_argument_with_context(
        format!("Cannot parse {} parameter '{}': '{}'", expected, key, raw),
        ErrorContext::new()
            .with_field_path(key)
            .with_details(raw)
            .with_source("query_parser"),
    )
}
