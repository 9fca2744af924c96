//! Route lookup.
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Exactly two targets; every path resolves to one of them, there is no
//!   NoMatch outcome
//! - The decision depends on the path alone

use std::fmt;

use axum::http::Method;
use url::Url;

use crate::config::schema::origin_str;
use crate::config::ProxyConfig;
use crate::routing::matcher::PathPrefixMatcher;

/// Upstream a request is forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// API server.
    Api,
    /// Client (UI dev server).
    Client,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Api => "api",
            Target::Client => "client",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision<'a> {
    pub request_method: Method,
    pub request_path: String,
    pub matches_api_prefix: bool,
    pub target: Target,
    pub target_origin: &'a Url,
}

/// Prefix classifier between the API and client origins.
#[derive(Debug, Clone)]
pub struct Router {
    api_prefix: PathPrefixMatcher,
    server_origin: Url,
    client_origin: Url,
}

impl Router {
    pub fn new(api_prefix: impl Into<String>, server_origin: Url, client_origin: Url) -> Self {
        Self {
            api_prefix: PathPrefixMatcher::new(api_prefix),
            server_origin,
            client_origin,
        }
    }

    /// Build the router from a resolved configuration.
    pub fn from_config(config: &ProxyConfig) -> Self {
        Self::new(
            config.api_path_prefix.clone(),
            config.server_origin.clone(),
            config.client_origin.clone(),
        )
    }

    /// Pick the target for `path`.
    pub fn target_for(&self, path: &str) -> Target {
        if self.api_prefix.matches(path) {
            Target::Api
        } else {
            Target::Client
        }
    }

    pub fn origin(&self, target: Target) -> &Url {
        match target {
            Target::Api => &self.server_origin,
            Target::Client => &self.client_origin,
        }
    }

    /// Classify a request.
    pub fn decide(&self, method: &Method, path: &str) -> RoutingDecision<'_> {
        let target = self.target_for(path);
        RoutingDecision {
            request_method: method.clone(),
            request_path: path.to_string(),
            matches_api_prefix: target == Target::Api,
            target,
            target_origin: self.origin(target),
        }
    }

    pub fn api_prefix(&self) -> &str {
        self.api_prefix.prefix()
    }
}

impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}* -> {}, * -> {}",
            self.api_prefix(),
            origin_str(&self.server_origin),
            origin_str(&self.client_origin)
        )
    }
}
