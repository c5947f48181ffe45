//! TOML-based service configuration.

use std::fmt;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::sim::PlantRatings;

/// Top-level service configuration parsed from TOML.
///
/// Every section is optional and falls back to [`ServiceConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Forecast model artifact location.
    #[serde(default)]
    pub model: ModelConfig,
    /// Plant capacities used by `/simulate`.
    #[serde(default)]
    pub plant: PlantRatings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface address to bind.
    pub bind: IpAddr,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Forecast model artifact location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Path to the JSON model artifact. A missing file selects the fallback forecast.
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ml/model.json"),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"plant.max_solar_kw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ServiceConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let p = &self.plant;

        for (field, value) in [
            ("plant.max_solar_kw", p.max_solar_kw),
            ("plant.max_wind_kw", p.max_wind_kw),
            ("plant.max_hydro_kw", p.max_hydro_kw),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!("must be a finite value > 0, got {value}"),
                });
            }
        }
        if !(p.hydro_efficiency > 0.0 && p.hydro_efficiency <= 1.0) {
            errors.push(ConfigError {
                field: "plant.hydro_efficiency".into(),
                message: format!("must be in (0.0, 1.0], got {}", p.hydro_efficiency),
            });
        }
        if self.model.path.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "model.path".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}
