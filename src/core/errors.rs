/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 *
 * Only bootstrap paths are fallible. Event identity and sample enrichment
 * never return errors: unresolved context degrades to empty fields.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sensor configuration errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    #[diagnostic(
        code(config::read_failed),
        help("Check that SENSOR_CONFIG points at a readable file.")
    )]
    Read { path: String, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    #[diagnostic(
        code(config::parse_failed),
        help("The sensor config must be a JSON object with optional sensor_id, trace_json and log_filter keys.")
    )]
    Parse { path: String, reason: String },

    #[error("Invalid value for {var}: {value}")]
    #[diagnostic(
        code(config::invalid_env),
        help("Boolean variables accept 1, true, 0 or false.")
    )]
    InvalidEnv { var: String, value: String },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
