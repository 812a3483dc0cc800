/*!
 * Sensor Configuration
 * JSON file plus environment overrides
 *
 * Environment variables:
 * - SENSOR_CONFIG: path to a JSON config file (optional)
 * - SENSOR_ID: stable sensor identifier (default: random UUID)
 * - SENSOR_TRACE_JSON: JSON log output (1/true/0/false)
 * - SENSOR_LOG: log filter used when RUST_LOG is unset
 */

use crate::core::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_CONFIG: &str = "SENSOR_CONFIG";
pub const ENV_SENSOR_ID: &str = "SENSOR_ID";
pub const ENV_TRACE_JSON: &str = "SENSOR_TRACE_JSON";
pub const ENV_LOG: &str = "SENSOR_LOG";

/// Sensor bootstrap configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Stable sensor identifier; generated when absent
    pub sensor_id: Option<String>,
    /// Emit JSON-formatted logs
    pub trace_json: bool,
    /// Log filter directive used when RUST_LOG is unset
    pub log_filter: Option<String>,
}

impl SensorConfig {
    /// Read a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> ConfigResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Config file named by SENSOR_CONFIG (if set), then environment overrides
    pub fn load() -> ConfigResult<Self> {
        let base = match std::env::var(ENV_CONFIG) {
            Ok(path) if !path.is_empty() => Self::from_file(path)?,
            _ => Self::default(),
        };
        base.with_env_overrides()
    }

    /// Apply SENSOR_* environment variables on top of this config
    pub fn with_env_overrides(mut self) -> ConfigResult<Self> {
        if let Ok(id) = std::env::var(ENV_SENSOR_ID) {
            self.sensor_id = Some(id);
        }

        if let Ok(value) = std::env::var(ENV_TRACE_JSON) {
            self.trace_json = parse_bool(ENV_TRACE_JSON, &value)?;
        }

        if let Ok(filter) = std::env::var(ENV_LOG) {
            if !filter.is_empty() {
                self.log_filter = Some(filter);
            }
        }

        Ok(self)
    }

    pub fn with_sensor_id(mut self, id: impl Into<String>) -> Self {
        self.sensor_id = Some(id.into());
        self
    }
}

fn parse_bool(var: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}
