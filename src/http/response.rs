//! Response handling.
//!
//! # Responsibilities
//! - Pass upstream responses back unchanged (status, headers, streaming body)
//! - Map forwarding failures to the plain-text proxy error response
//!
//! # Design Decisions
//! - Streaming responses avoid buffering the entire body
//! - Connection failures map to 500, deadline expiry to 504
//! - A failure after headers were sent cannot be reported; hyper aborts the
//!   body and the client sees a truncated response

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use hyper::body::Incoming;

use crate::error::ProxyError;

/// Prefix of every body produced by the error handler.
pub const PROXY_ERROR_PREFIX: &str = "Proxy error: ";

/// Wrap an upstream response for the client without touching it.
pub fn passthrough(response: Response<Incoming>) -> Response {
    let (parts, body) = response.into_parts();
    Response::from_parts(parts, Body::new(body))
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) | ProxyError::InvalidUpstreamUri(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = format!("{}{}", PROXY_ERROR_PREFIX, self);
        let mut response = (self.status(), body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain"),
        );
        response
    }
}
