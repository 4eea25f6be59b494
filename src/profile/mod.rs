//! # Profile Resolution
//!
//! Computes the effective profile of a request through a pluggable resolver
//! and strips the hints that only matter for that decision.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ProfileResolver`] | Resolver contract: hints in, profile name out |
//! | [`ConfiguredProfileResolver`] | Resolver over a fixed list of configured profiles |
//! | [`resolve_profile`] | Applies a resolver to one request |
//! | [`resolve_requested_profile`] | Same, with the caller's raw profile name |
//! | [`remove_legacy_parameters`] | Drops `weighting`, `vehicle`, `edge_based`, `turn_costs` |

pub mod configured;

pub use configured::ConfiguredProfileResolver;

use crate::types::{Hints, RoutingRequest};
use crate::{Error, ErrorContext, Result};

/// Hint keys that predate named profiles. Accepted for selection, never dispatched.
pub const LEGACY_HINT_KEYS: [&str; 4] = ["weighting", "vehicle", "edge_based", "turn_costs"];

/// Hint carrying the requested profile name during resolution.
pub const PROFILE_HINT: &str = "profile";
/// Hint telling the resolver whether curbside constraints were supplied.
pub const HAS_CURBSIDES_HINT: &str = "has_curbsides";

/// Chooses a profile from the resolution hints.
///
/// The hints carry everything the request carries plus [`PROFILE_HINT`] and
/// [`HAS_CURBSIDES_HINT`]. An empty result keeps the request profile as is.
pub trait ProfileResolver: Send + Sync {
    fn resolve_profile(&self, hints: &Hints) -> Result<String>;
}

/// Resolves and assigns `request.profile`, then strips legacy hints.
pub fn resolve_profile(resolver: &dyn ProfileResolver, request: &mut RoutingRequest) -> Result<()> {
    let requested = request.profile.clone();
    resolve_requested_profile(resolver, request, &requested)
}

/// Like [`resolve_profile`], but the resolver sees `requested` as the profile
/// name instead of the current `request.profile`.
pub fn resolve_requested_profile(
    resolver: &dyn ProfileResolver,
    request: &mut RoutingRequest,
    requested: &str,
) -> Result<()> {
    if request.custom_model.is_some() && request.profile.is_empty() {
        return Err(Error::invalid_argument_with_context(
            "The 'profile' parameter is required when you use the `custom_model` parameter",
            ErrorContext::new()
                .with_field_path("profile")
                .with_source("profile_resolver"),
        ));
    }

    let mut hints = request.hints.clone();
    hints
        .put(PROFILE_HINT, requested)
        .put(HAS_CURBSIDES_HINT, request.has_curbsides());
    let resolved = resolver.resolve_profile(&hints)?;
    if !resolved.is_empty() {
        request.profile = resolved;
    }

    remove_legacy_parameters(&mut request.hints);
    Ok(())
}

pub fn remove_legacy_parameters(hints: &mut Hints) {
    for key in LEGACY_HINT_KEYS {
        hints.remove(key);
    }
}
