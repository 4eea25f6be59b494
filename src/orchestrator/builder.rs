use super::RouteOrchestrator;
use crate::config::{OrchestratorConfig, ProfileConfig, ServerConfig};
use crate::engine::{PassthroughTransformer, RequestTransformer, RoutingEngine, DATA_DATE_PROPERTY};
use crate::profile::{ConfiguredProfileResolver, ProfileResolver};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;

/// Builder for [`RouteOrchestrator`].
///
/// Only the engine is mandatory. Without an explicit resolver the configured
/// profiles are used; without a transformer requests pass through unchanged.
pub struct OrchestratorBuilder {
    engine: Option<Arc<dyn RoutingEngine>>,
    resolver: Option<Arc<dyn ProfileResolver>>,
    transformer: Arc<dyn RequestTransformer>,
    config: OrchestratorConfig,
    profiles: Vec<ProfileConfig>,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        let defaults = ServerConfig::default();
        Self {
            engine: None,
            resolver: None,
            transformer: Arc::new(PassthroughTransformer),
            config: OrchestratorConfig::from(&defaults),
            profiles: defaults.profiles,
        }
    }

    pub fn with_engine(mut self, engine: Arc<dyn RoutingEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_profile_resolver(mut self, resolver: Arc<dyn ProfileResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_transformer(mut self, transformer: Arc<dyn RequestTransformer>) -> Self {
        self.transformer = transformer;
        self
    }

    /// Takes routing settings, copyrights and profiles from a loaded server config.
    pub fn with_server_config(mut self, config: &ServerConfig) -> Self {
        self.config = OrchestratorConfig::from(config);
        self.profiles = config.profiles.clone();
        self
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Reads the engine properties once and freezes the configuration.
    pub fn build(self) -> Result<RouteOrchestrator> {
        let engine = self.engine.ok_or_else(|| {
            Error::configuration_with_context(
                "a routing engine is required",
                ErrorContext::new()
                    .with_field_path("engine")
                    .with_source("orchestrator_builder"),
            )
        })?;
        let resolver = self
            .resolver
            .unwrap_or_else(|| Arc::new(ConfiguredProfileResolver::new(self.profiles)));

        let mut config = self.config;
        if config.data_date.is_none() {
            config.data_date = engine.properties().remove(DATA_DATE_PROPERTY);
        }

        Ok(RouteOrchestrator {
            engine,
            resolver,
            transformer: self.transformer,
            config: Arc::new(config),
        })
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
