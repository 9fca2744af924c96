//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound the wait for upstream response headers
//! - Cancel the upstream request cleanly on expiry (the future is dropped,
//!   which closes its connection)
//!
//! # Design Decisions
//! - Only response headers are bounded; bodies may stream indefinitely
//! - Timeout errors are distinct from connection errors (504, not 500)

use std::future::Future;
use std::time::Duration;

use crate::error::ProxyError;

/// Run `fut` under an optional deadline.
pub async fn with_deadline<F, T, E>(deadline: Option<Duration>, fut: F) -> Result<T, ProxyError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<ProxyError>,
{
    match deadline {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(ProxyError::Timeout(limit)),
        },
        None => fut.await.map_err(Into::into),
    }
}
