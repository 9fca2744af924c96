//! Configuration schema definitions.
//!
//! `ProxyConfig` is the fully resolved, immutable configuration of the
//! proxy. `SharedConfig` is the optional secondary source supplied by the
//! rest of the development stack (a TOML file).

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Listen port used when `PROXY_PORT` is not set.
pub const DEFAULT_LISTEN_PORT: u16 = 3000;

/// API server port used to synthesize the server origin.
pub const DEFAULT_API_PORT: u16 = 3005;

/// Client (UI dev server) origin used when `CLIENT_URL` is not set.
pub const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:5173";

/// Path prefix that classifies a request as API traffic.
pub const DEFAULT_API_PATH_PREFIX: &str = "/api/";

/// Deadline for upstream response headers.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Root configuration for the proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    /// Port the listener binds on all interfaces.
    pub listen_port: u16,

    /// Origin receiving all non-API traffic.
    pub client_origin: Url,

    /// Origin receiving API traffic.
    pub server_origin: Url,

    /// Literal, case-sensitive prefix identifying API paths.
    pub api_path_prefix: String,

    /// Log verbosity.
    pub log_level: LogLevel,

    /// Deadline for the upstream to produce response headers.
    /// `None` waits indefinitely.
    pub request_timeout: Option<Duration>,

    /// Prometheus exporter bind address. `None` disables the exporter.
    pub metrics_address: Option<SocketAddr>,
}

impl ProxyConfig {
    /// Address the listener binds to.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.listen_port))
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_LISTEN_PORT,
            client_origin: Url::parse(DEFAULT_CLIENT_ORIGIN)
                .expect("default client origin is a valid URL"),
            server_origin: local_origin(DEFAULT_API_PORT),
            api_path_prefix: DEFAULT_API_PATH_PREFIX.to_string(),
            log_level: LogLevel::default(),
            request_timeout: Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
            metrics_address: None,
        }
    }
}

impl fmt::Display for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "port={} client={} server={} api_prefix={:?} log_level={}",
            self.listen_port,
            origin_str(&self.client_origin),
            origin_str(&self.server_origin),
            self.api_path_prefix,
            self.log_level,
        )?;
        match self.request_timeout {
            Some(t) => write!(f, " timeout={}s", t.as_secs())?,
            None => write!(f, " timeout=none")?,
        }
        if let Some(addr) = self.metrics_address {
            write!(f, " metrics={}", addr)?;
        }
        Ok(())
    }
}

/// `http://localhost:<port>`.
pub fn local_origin(port: u16) -> Url {
    Url::parse(&format!("http://localhost:{}", port))
        .expect("localhost origin with a numeric port is a valid URL")
}

/// Renders an origin without the trailing slash `Url` adds to bare hosts.
pub fn origin_str(url: &Url) -> &str {
    url.as_str().trim_end_matches('/')
}

/// Log verbosity accepted by `LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the four accepted levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogLevel;

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(UnknownLogLevel),
        }
    }
}

/// Settings provided by the surrounding development stack.
///
/// Consulted only for fields whose environment variable is unset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SharedConfig {
    /// Port the API server listens on.
    pub api_port: Option<u16>,

    /// Default log verbosity for the whole stack.
    pub log_level: Option<LogLevel>,
}
