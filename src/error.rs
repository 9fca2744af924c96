//! Per-request proxy errors.

use std::error::Error as StdError;
use std::time::Duration;

use axum::http::uri::InvalidUriParts;
use thiserror::Error;

/// Failure of a single forwarding attempt, before response headers were
/// received from the upstream.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Connection refused, reset, DNS failure and the like.
    #[error("{}", chain(.0))]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The upstream produced no response headers within the deadline.
    #[error("upstream did not respond within {}s", .0.as_secs())]
    Timeout(Duration),

    /// The request URI could not be re-targeted at the chosen origin.
    #[error("invalid upstream uri: {0}")]
    InvalidUpstreamUri(#[from] InvalidUriParts),
}

impl ProxyError {
    /// Metric label for the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::Upstream(e) if e.is_connect() => "connect",
            ProxyError::Upstream(_) => "upstream",
            ProxyError::Timeout(_) => "timeout",
            ProxyError::InvalidUpstreamUri(_) => "uri",
        }
    }
}

/// Render an error followed by its sources, `outer: inner: root`.
pub fn chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
