//! Server configuration
//!
//! Loaded once at startup from YAML (optional) and environment overrides, then
//! frozen into an [`OrchestratorConfig`] that every request reads.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ListenConfig,
    pub routing: RoutingConfig,
    /// Copyright strings of the single-route info block.
    pub copyrights: Vec<String>,
    /// Copyright strings of the batch info block.
    pub bulk_copyrights: Vec<String>,
    /// Profiles known to the reference profile resolver.
    pub profiles: Vec<ProfileConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Comma separated, e.g. "tunnel,bridge,ferry".
    pub snap_preventions_default: String,
    /// Whether elevation data is loaded.
    pub elevation: bool,
    /// Upper bound of concurrently routed batch destinations.
    pub max_bulk_concurrency: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    #[serde(default)]
    pub vehicle: String,
    #[serde(default = "default_weighting")]
    pub weighting: String,
    #[serde(default)]
    pub turn_costs: bool,
}

fn default_weighting() -> String {
    "fastest".to_string()
}

impl ProfileConfig {
    pub fn new(name: impl Into<String>, vehicle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vehicle: vehicle.into(),
            weighting: default_weighting(),
            turn_costs: false,
        }
    }

    pub fn with_weighting(mut self, weighting: impl Into<String>) -> Self {
        self.weighting = weighting.into();
        self
    }

    pub fn with_turn_costs(mut self, turn_costs: bool) -> Self {
        self.turn_costs = turn_costs;
        self
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8989,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            snap_preventions_default: String::new(),
            elevation: false,
            max_bulk_concurrency: 4,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ListenConfig::default(),
            routing: RoutingConfig::default(),
            copyrights: vec!["GraphHopper".to_string(), "OpenStreetMap contributors".to_string()],
            bulk_copyrights: vec![
                "Swift Routes".to_string(),
                "powered by GraphHopper".to_string(),
            ],
            profiles: vec![ProfileConfig::new("car", "car")],
        }
    }
}

impl ServerConfig {
    /// Load config from a YAML file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ServerConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Apply `ROUTE_*` environment overrides.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(host) = lookup("ROUTE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ROUTE_PORT") {
            self.server.port = parse_env("ROUTE_PORT", &port)?;
        }
        if let Some(snap) = lookup("ROUTE_SNAP_PREVENTIONS_DEFAULT") {
            self.routing.snap_preventions_default = snap;
        }
        if let Some(elevation) = lookup("ROUTE_ELEVATION") {
            self.routing.elevation = parse_env("ROUTE_ELEVATION", &elevation)?;
        }
        if let Some(n) = lookup("ROUTE_BULK_CONCURRENCY") {
            let n: usize = parse_env("ROUTE_BULK_CONCURRENCY", &n)?;
            self.routing.max_bulk_concurrency = n.max(1);
        }
        Ok(self)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Parsed default snap-prevention list: trimmed, empty entries dropped.
    pub fn snap_preventions_default(&self) -> Vec<String> {
        self.routing
            .snap_preventions_default
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        Error::configuration_with_context(
            format!("cannot parse value '{}'", raw),
            ErrorContext::new().with_field_path(key).with_source("env"),
        )
    })
}

/// Read-only process-wide settings shared by all requests.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    pub snap_preventions_default: Vec<String>,
    pub has_elevation: bool,
    pub copyrights: Vec<String>,
    pub bulk_copyrights: Vec<String>,
    /// Data source date reported by the engine, if any.
    pub data_date: Option<String>,
    pub max_bulk_concurrency: usize,
    /// Creator version written into GPX documents.
    pub version: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        OrchestratorConfig::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for OrchestratorConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            snap_preventions_default: config.snap_preventions_default(),
            has_elevation: config.routing.elevation,
            copyrights: config.copyrights.clone(),
            bulk_copyrights: config.bulk_copyrights.clone(),
            data_date: None,
            max_bulk_concurrency: config.routing.max_bulk_concurrency.max(1),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server_addr(), "127.0.0.1:8989");
        assert!(config.snap_preventions_default().is_empty());
        assert_eq!(config.bulk_copyrights, vec!["Swift Routes", "powered by GraphHopper"]);
    }

    #[test]
    fn test_snap_preventions_default_is_trimmed() {
        let mut config = ServerConfig::default();
        config.routing.snap_preventions_default = " tunnel, ,bridge,ferry ,".to_string();
        assert_eq!(
            config.snap_preventions_default(),
            vec!["tunnel", "bridge", "ferry"]
        );
    }

    #[test]
    fn test_from_yaml_keeps_missing_defaults() {
        let config = ServerConfig::from_yaml(
            r#"
routing:
  snap_preventions_default: "tunnel,ferry"
  elevation: true
profiles:
  - name: bike
    vehicle: bike
  - name: car_tc
    vehicle: car
    turn_costs: true
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8989);
        assert!(config.routing.elevation);
        assert_eq!(config.routing.max_bulk_concurrency, 4);
        assert_eq!(config.profiles.len(), 2);
        assert_eq!(config.profiles[0].weighting, "fastest");
        assert!(config.profiles[1].turn_costs);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ROUTE_PORT", "9000"),
            ("ROUTE_ELEVATION", "true"),
            ("ROUTE_BULK_CONCURRENCY", "0"),
        ]
        .into_iter()
        .collect();
        let config = ServerConfig::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(config.routing.elevation);
        assert_eq!(config.routing.max_bulk_concurrency, 1);
    }

    #[test]
    fn test_env_override_rejects_bad_port() {
        let err = ServerConfig::default()
            .with_overrides(|k| (k == "ROUTE_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("ROUTE_PORT"));
    }
}
