//! Profile resolver backed by the configured profile list.

use super::{ProfileResolver, HAS_CURBSIDES_HINT, PROFILE_HINT};
use crate::config::ProfileConfig;
use crate::types::Hints;
use crate::{Error, ErrorContext, Result};

/// Selects among a fixed set of profiles.
///
/// An explicit profile name must be configured. Without one the legacy
/// `vehicle`, `weighting`, `turn_costs` and `edge_based` hints pick the first
/// matching profile; a lone configured profile is the fallback.
#[derive(Debug, Clone)]
pub struct ConfiguredProfileResolver {
    profiles: Vec<ProfileConfig>,
}

impl ConfiguredProfileResolver {
    pub fn new(profiles: Vec<ProfileConfig>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[ProfileConfig] {
        &self.profiles
    }

    fn available(&self) -> String {
        let names: Vec<&str> = self.profiles.iter().map(|p| p.name.as_str()).collect();
        format!("[{}]", names.join(", "))
    }

    fn resolve_legacy(&self, hints: &Hints) -> Result<String> {
        let vehicle = hints.get_str("vehicle").filter(|s| !s.is_empty());
        let weighting = hints.get_str("weighting").filter(|s| !s.is_empty());
        let turn_costs = hints
            .get("turn_costs")
            .or_else(|| hints.get("edge_based"))
            .and_then(|v| v.as_bool());

        if vehicle.is_none() && weighting.is_none() && turn_costs.is_none() {
            if let [only] = self.profiles.as_slice() {
                return Ok(only.name.clone());
            }
            return Err(Error::invalid_argument_with_context(
                format!(
                    "You need to specify a profile to perform a routing request. Available profiles: {}",
                    self.available()
                ),
                ErrorContext::new().with_field_path("profile"),
            ));
        }

        // Curbsides only work with turn costs unless the caller decided explicitly.
        let turn_costs = turn_costs.or_else(|| hints.get_bool(HAS_CURBSIDES_HINT, false).then_some(true));

        self.profiles
            .iter()
            .find(|p| {
                vehicle.map_or(true, |v| p.vehicle.eq_ignore_ascii_case(v))
                    && weighting.map_or(true, |w| p.weighting.eq_ignore_ascii_case(w))
                    && turn_costs.map_or(true, |tc| p.turn_costs == tc)
            })
            .map(|p| p.name.clone())
            .ok_or_else(|| {
                Error::invalid_argument_with_context(
                    format!(
                        "Cannot find matching profile for your request. Available profiles: {}",
                        self.available()
                    ),
                    ErrorContext::new()
                        .with_field_path("profile")
                        .with_details(format!(
                            "vehicle={:?}, weighting={:?}, turn_costs={:?}",
                            vehicle, weighting, turn_costs
                        )),
                )
            })
    }
}

impl ProfileResolver for ConfiguredProfileResolver {
    fn resolve_profile(&self, hints: &Hints) -> Result<String> {
        match hints.get_str(PROFILE_HINT).filter(|s| !s.is_empty()) {
            Some(name) if self.profiles.iter().any(|p| p.name == name) => Ok(name.to_string()),
            Some(name) => Err(Error::invalid_argument_with_context(
                format!(
                    "The requested profile '{}' does not exist. Available profiles: {}",
                    name,
                    self.available()
                ),
                ErrorContext::new()
                    .with_field_path("profile")
                    .with_source("profile_resolver"),
            )),
            None => self.resolve_legacy(hints),
        }
    }
}
