//! Application configuration.
//!
//! Settings come from an optional TOML file and are then overridden by
//! environment variables.
//!
//! ```toml
//! [dataset]
//! path = "data/wfp_food_prices_phl.csv"
//! preamble_rows = 1
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! ```
//!
//! # Environment Variables
//! - `FOOD_PRICES_CONFIG`: path to the TOML file (optional)
//! - `FOOD_PRICES_DATA`: dataset path
//! - `FOOD_PRICES_PREAMBLE_ROWS`: rows to skip before the header
//! - `HOST`, `PORT`: bind address

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{PipelineError, PipelineResult};
use crate::source::{CsvFileSource, DatasetSource, DEFAULT_PREAMBLE_ROWS};

pub const CONFIG_PATH_VAR: &str = "FOOD_PRICES_CONFIG";
pub const DATA_PATH_VAR: &str = "FOOD_PRICES_DATA";
pub const PREAMBLE_ROWS_VAR: &str = "FOOD_PRICES_PREAMBLE_ROWS";
pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    #[serde(default = "default_preamble_rows")]
    pub preamble_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/wfp_food_prices_phl.csv")
}

fn default_preamble_rows() -> usize {
    DEFAULT_PREAMBLE_ROWS
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            preamble_rows: default_preamble_rows(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PipelineError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PipelineResult<Self> {
        toml::from_str(content).map_err(|e| {
            PipelineError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load from `FOOD_PRICES_CONFIG` (if set) and apply environment overrides.
    pub fn from_env() -> PipelineResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> PipelineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(path) = lookup(DATA_PATH_VAR) {
            config.dataset.path = PathBuf::from(path);
        }
        if let Some(rows) = lookup(PREAMBLE_ROWS_VAR) {
            config.dataset.preamble_rows = rows.trim().parse().map_err(|_| {
                PipelineError::configuration(format!(
                    "{} must be a non-negative integer, got '{}'",
                    PREAMBLE_ROWS_VAR, rows
                ))
            })?;
        }
        if let Some(host) = lookup(HOST_VAR) {
            config.server.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            config.server.port = port.trim().parse().map_err(|_| {
                PipelineError::configuration(format!(
                    "{} must be a valid port number, got '{}'",
                    PORT_VAR, port
                ))
            })?;
        }

        Ok(config)
    }

    /// The CSV source described by the `[dataset]` section.
    pub fn dataset_source(&self) -> Arc<dyn DatasetSource> {
        Arc::new(
            CsvFileSource::new(&self.dataset.path).with_preamble_rows(self.dataset.preamble_rows),
        )
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("data/wfp_food_prices_phl.csv"));
        assert_eq!(config.dataset.preamble_rows, 1);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.dataset, DatasetSettings::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DATA_PATH_VAR, "/srv/prices.csv"),
            (PREAMBLE_ROWS_VAR, "0"),
            (HOST_VAR, "127.0.0.1"),
            (PORT_VAR, "3000"),
        ]))
        .unwrap();

        assert_eq!(config.dataset.path, PathBuf::from("/srv/prices.csv"));
        assert_eq!(config.dataset.preamble_rows, 0);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup_from(&[(PORT_VAR, "eighty")])).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration { .. }));
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(AppConfig::from_toml_str("[server\nport = 1").is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err =
            AppConfig::from_lookup(lookup_from(&[(CONFIG_PATH_VAR, "/nonexistent/app.toml")]))
                .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/app.toml"));
    }
}
