//! Configuration value validation.
//!
//! Every raw string coming from the environment passes through one of these
//! parsers. A malformed value is rejected with the variable name attached
//! instead of silently degrading to a default.

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use crate::config::loader::ConfigError;
use crate::config::schema::LogLevel;

/// Parse a TCP port number.
pub fn parse_port(var: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort {
            var,
            value: raw.to_string(),
        })
}

/// Parse an upstream origin. Only absolute `http` URLs with a host are
/// accepted; a path component is ignored when forwarding.
pub fn parse_origin(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidOrigin {
        var,
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "http" {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

pub fn parse_log_level(var: &'static str, raw: &str) -> Result<LogLevel, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidLogLevel {
        var,
        value: raw.to_string(),
    })
}

/// Parse a timeout in whole seconds. Zero disables the deadline.
pub fn parse_timeout(var: &'static str, raw: &str) -> Result<Option<Duration>, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidTimeout {
            var,
            value: raw.to_string(),
        })?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

pub fn parse_socket_addr(var: &'static str, raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidAddress {
            var,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ports() {
        assert_eq!(parse_port("PROXY_PORT", "8080").unwrap(), 8080);
        assert_eq!(parse_port("PROXY_PORT", " 80 ").unwrap(), 80);
        assert!(matches!(
            parse_port("PROXY_PORT", "eighty"),
            Err(ConfigError::InvalidPort { var: "PROXY_PORT", .. })
        ));
        assert!(parse_port("PROXY_PORT", "70000").is_err());
        assert!(parse_port("PROXY_PORT", "-1").is_err());
    }

    #[test]
    fn origins() {
        let url = parse_origin("CLIENT_URL", "http://127.0.0.1:5173").unwrap();
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(5173));

        assert!(parse_origin("CLIENT_URL", "localhost:5173").is_err());
        assert!(parse_origin("CLIENT_URL", "https://example.com").is_err());
        assert!(parse_origin("CLIENT_URL", "not a url").is_err());
    }

    #[test]
    fn timeouts() {
        assert_eq!(
            parse_timeout("PROXY_TIMEOUT_SECS", "5").unwrap(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(parse_timeout("PROXY_TIMEOUT_SECS", "0").unwrap(), None);
        assert!(parse_timeout("PROXY_TIMEOUT_SECS", "1.5").is_err());
    }

    #[test]
    fn socket_addresses() {
        assert_eq!(
            parse_socket_addr("METRICS_ADDR", "127.0.0.1:9090").unwrap().port(),
            9090
        );
        assert!(parse_socket_addr("METRICS_ADDR", "localhost").is_err());
    }
}
