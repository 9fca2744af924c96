//! Configuration loading from the process environment.
//!
//! Each field resolves from its environment variable first, then from the
//! shared configuration, then from a fixed default. Empty variables count as
//! unset.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{local_origin, ProxyConfig, SharedConfig, DEFAULT_API_PORT};
use crate::config::validation::{
    parse_log_level, parse_origin, parse_port, parse_socket_addr, parse_timeout,
};

pub const PROXY_PORT: &str = "PROXY_PORT";
pub const CLIENT_URL: &str = "CLIENT_URL";
pub const SERVER_URL: &str = "SERVER_URL";
pub const API_PORT: &str = "API_PORT";
pub const API_PATH_PATTERN: &str = "API_PATH_PATTERN";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const PROXY_TIMEOUT_SECS: &str = "PROXY_TIMEOUT_SECS";
pub const METRICS_ADDR: &str = "METRICS_ADDR";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid port '{value}'")]
    InvalidPort { var: &'static str, value: String },

    #[error("{var}: invalid origin '{value}': {reason}")]
    InvalidOrigin {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{var}: unknown log level '{value}' (expected debug, info, warn or error)")]
    InvalidLogLevel { var: &'static str, value: String },

    #[error("{var}: invalid timeout '{value}' (expected whole seconds)")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var}: invalid socket address '{value}'")]
    InvalidAddress { var: &'static str, value: String },

    #[error("failed to read shared config {}: {source}", .path.display())]
    SharedIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse shared config {}: {source}", .path.display())]
    SharedParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ProxyConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env(shared: &SharedConfig) -> Result<Self, ConfigError> {
        load_from(|key| std::env::var(key).ok(), shared)
    }
}

/// Resolve the configuration from an arbitrary variable lookup.
pub fn load_from<F>(lookup: F, shared: &SharedConfig) -> Result<ProxyConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let defaults = ProxyConfig::default();

    let listen_port = match var(PROXY_PORT) {
        Some(raw) => parse_port(PROXY_PORT, &raw)?,
        None => defaults.listen_port,
    };

    let client_origin = match var(CLIENT_URL) {
        Some(raw) => parse_origin(CLIENT_URL, &raw)?,
        None => defaults.client_origin,
    };

    let server_origin = match var(SERVER_URL) {
        Some(raw) => parse_origin(SERVER_URL, &raw)?,
        None => {
            let api_port = match var(API_PORT) {
                Some(raw) => parse_port(API_PORT, &raw)?,
                None => shared.api_port.unwrap_or(DEFAULT_API_PORT),
            };
            local_origin(api_port)
        }
    };

    let api_path_prefix = match var(API_PATH_PATTERN) {
        Some(raw) => raw,
        None => defaults.api_path_prefix,
    };

    let log_level = match var(LOG_LEVEL) {
        Some(raw) => parse_log_level(LOG_LEVEL, &raw)?,
        None => shared.log_level.unwrap_or(defaults.log_level),
    };

    let request_timeout = match var(PROXY_TIMEOUT_SECS) {
        Some(raw) => parse_timeout(PROXY_TIMEOUT_SECS, &raw)?,
        None => defaults.request_timeout,
    };

    let metrics_address = var(METRICS_ADDR)
        .map(|raw| parse_socket_addr(METRICS_ADDR, &raw))
        .transpose()?;

    Ok(ProxyConfig {
        listen_port,
        client_origin,
        server_origin,
        api_path_prefix,
        log_level,
        request_timeout,
        metrics_address,
    })
}

/// Load the shared configuration from a TOML file.
pub fn load_shared(path: &Path) -> Result<SharedConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::SharedIo {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::SharedParse {
        path: path.to_path_buf(),
        source,
    })
}
