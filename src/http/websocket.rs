//! Connection upgrade proxying (WebSocket, dev-server HMR).
//!
//! # Data Flow
//! ```text
//! Client ──Upgrade request──▶ Proxy ──forwarded unchanged──▶ Upstream
//! Client ◀──101 response──── Proxy ◀──101 Switching──────── Upstream
//! Client ◀════ raw bytes ════ Proxy ════ raw bytes ════════▶ Upstream
//! ```
//!
//! # Design Decisions
//! - The handshake goes through the normal forwarding path; only a 101
//!   answer turns the exchange into a tunnel
//! - Bytes are copied as-is; frames are never parsed
//! - The tunnel runs in its own task and ends when either side closes

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, Response, StatusCode},
};
use hyper::upgrade::OnUpgrade;
use hyper_util::rt::TokioIo;

use crate::observability::metrics;
use crate::routing::Target;

/// True if the request asks to switch protocols.
pub fn wants_upgrade(headers: &HeaderMap) -> bool {
    headers.contains_key(header::UPGRADE)
        && headers
            .get_all(header::CONNECTION)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .any(|token| token.trim().eq_ignore_ascii_case("upgrade"))
}

/// Detach the client side of a pending upgrade, if one was requested.
pub fn take_client_upgrade(request: &mut Request<Body>) -> Option<OnUpgrade> {
    if !wants_upgrade(request.headers()) {
        return None;
    }
    request.extensions_mut().remove::<OnUpgrade>()
}

/// Join the client and upstream connections once the upstream agreed to
/// switch protocols. Any other status leaves the response untouched.
pub fn tunnel<B>(client: OnUpgrade, response: &mut Response<B>, target: Target) {
    if response.status() != StatusCode::SWITCHING_PROTOCOLS {
        return;
    }
    let upstream = hyper::upgrade::on(response);
    metrics::record_upgrade(target);

    tokio::spawn(async move {
        let (client, upstream) = match tokio::try_join!(client, upstream) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(upstream = %target, error = %e, "Upgrade failed");
                return;
            }
        };

        let mut client = TokioIo::new(client);
        let mut upstream = TokioIo::new(upstream);
        match tokio::io::copy_bidirectional(&mut client, &mut upstream).await {
            Ok((sent, received)) => {
                tracing::debug!(upstream = %target, sent, received, "Upgraded connection closed");
            }
            Err(e) => {
                tracing::debug!(upstream = %target, error = %e, "Upgraded connection ended");
            }
        }
    });
}
