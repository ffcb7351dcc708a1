//! Service configuration: TOML file plus a few environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::haversine::DEFAULT_SPEED_KMH;
use crate::osrm::OsrmConfig;
use crate::planner::PlanOptions;

/// Env var naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "WASTE_ROUTER_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub osrm: OsrmConfig,
    pub planner: PlannerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Which leg oracle the planner calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    #[default]
    Osrm,
    Haversine,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    #[serde(flatten)]
    pub options: PlanOptions,
    pub oracle: OracleKind,
    /// Only used by the haversine oracle.
    pub haversine_speed_kmh: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            options: PlanOptions::default(),
            oracle: OracleKind::default(),
            haversine_speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON file loaded into the stores at startup.
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// File from `WASTE_ROUTER_CONFIG` if set (defaults otherwise), then env
    /// overrides `WASTE_ROUTER_BIND` and `OSRM_BASE_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(path)?,
            _ => Self::default(),
        };

        if let Ok(bind) = std::env::var("WASTE_ROUTER_BIND") {
            config.server.bind = bind;
        }
        if let Ok(url) = std::env::var("OSRM_BASE_URL") {
            config.osrm.base_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let planner = &self.planner;
        if planner.options.max_zones_per_truck == 0 {
            return Err(ConfigError::Invalid("planner.max_zones_per_truck must be at least 1".into()));
        }
        if !planner.options.depot.is_finite() {
            return Err(ConfigError::Invalid("planner.depot must be finite [lng, lat]".into()));
        }
        let speed = planner.haversine_speed_kmh;
        if speed.is_nan() || speed <= 0.0 {
            return Err(ConfigError::Invalid("planner.haversine_speed_kmh must be positive".into()));
        }
        if self.osrm.timeout_secs == 0 {
            return Err(ConfigError::Invalid("osrm.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:5000");
        assert_eq!(config.osrm.profile, "driving");
        assert_eq!(config.planner.options.max_zones_per_truck, 10);
        assert_eq!(config.planner.oracle, OracleKind::Osrm);
        assert!(config.data.seed_path.is_none());
    }

    #[test]
    fn test_full_file() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            bind = "127.0.0.1:8080"

            [osrm]
            base_url = "http://osrm:5000"
            timeout_secs = 3

            [planner]
            depot = [77.60, 12.95]
            max_zones_per_truck = 6
            oracle = "haversine"
            haversine_speed_kmh = 30.0

            [data]
            seed_path = "seed.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.osrm.base_url, "http://osrm:5000");
        assert_eq!(config.osrm.profile, "driving");
        assert_eq!(config.planner.options.depot, Coordinate::new(77.60, 12.95));
        assert_eq!(config.planner.options.max_zones_per_truck, 6);
        assert_eq!(config.planner.oracle, OracleKind::Haversine);
        assert_eq!(config.data.seed_path, Some(PathBuf::from("seed.json")));
    }

    #[test]
    fn test_rejects_zero_cap() {
        let result = AppConfig::from_toml("[planner]\nmax_zones_per_truck = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_unknown_oracle() {
        let result = AppConfig::from_toml("[planner]\noracle = \"google\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
