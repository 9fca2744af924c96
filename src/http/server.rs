//! HTTP server setup and request forwarding.
//!
//! # Responsibilities
//! - Create the Axum router with a single fallback handler
//! - Classify each request (routing engine) and forward it to the chosen origin
//! - Hand failed forwards to the proxy error handler
//! - Stop accepting connections when the shutdown signal fires

use std::future::IntoFuture;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        uri::{Authority, Scheme},
        Request as HttpRequest, Uri, Version,
    },
    response::{IntoResponse, Response},
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::config::schema::origin_str;
use crate::config::{LogLevel, ProxyConfig};
use crate::error::ProxyError;
use crate::http::response::passthrough;
use crate::http::websocket;
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;
use crate::routing::Router as ProxyRouter;

/// Pooled client used for every upstream call.
pub type UpstreamClient = Client<HttpConnector, Body>;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub client: UpstreamClient,
    pub request_timeout: Option<Duration>,
    pub log_requests: bool,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(90))
            .build(HttpConnector::new());

        let state = AppState {
            router: Arc::new(ProxyRouter::from_config(&config)),
            client,
            request_timeout: config.request_timeout,
            log_requests: config.log_level == LogLevel::Debug,
        };

        Self {
            router: build_router(state),
        }
    }

    /// Serve on `listener` until a value arrives on `shutdown`.
    ///
    /// In-flight requests are not drained: once the shutdown signal fires
    /// the accept loop stops and the upstream pool is released.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        // The client (and its idle pool) lives in the router's state and is
        // dropped together with the serve future.
        let serve = axum::serve(listener, self.router).into_future();

        tokio::select! {
            result = serve => result?,
            _ = shutdown.recv() => {
                tracing::info!("Shutdown signal received, closing listener and idle upstream connections");
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .fallback(proxy_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http().on_failure(()))
}

/// Main proxy handler.
/// Classifies the request, forwards it once, and streams the answer back.
async fn proxy_handler(State(state): State<AppState>, mut request: Request) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let decision = state.router.decide(&method, request.uri().path());
    let target = decision.target;

    if state.log_requests {
        tracing::debug!(
            method = %method,
            url = %request.uri(),
            upstream = %origin_str(decision.target_origin),
            "Proxying request"
        );
    }

    let upgrade = websocket::take_client_upgrade(&mut request);

    let forwarded = match retarget(request, decision.target_origin) {
        Ok(req) => req,
        Err(e) => return handle_error(e, target, &method, start_time),
    };

    match with_deadline(state.request_timeout, state.client.request(forwarded)).await {
        Ok(mut response) => {
            metrics::record_request(method.as_str(), target, response.status().as_u16(), start_time);
            if let Some(client_upgrade) = upgrade {
                websocket::tunnel(client_upgrade, &mut response, target);
            }
            passthrough(response)
        }
        Err(e) => handle_error(e, target, &method, start_time),
    }
}

/// Proxy error handler: log unconditionally and answer in plain text.
fn handle_error(
    error: ProxyError,
    target: crate::routing::Target,
    method: &axum::http::Method,
    start_time: Instant,
) -> Response {
    tracing::error!(upstream = %target, error = %error, "Proxy error");
    metrics::record_upstream_error(target, error.kind());
    metrics::record_request(method.as_str(), target, error.status().as_u16(), start_time);
    error.into_response()
}

/// Point the request at `origin`, keeping path, query, method, headers and
/// body exactly as received.
pub fn retarget(request: Request, origin: &Url) -> Result<HttpRequest<Body>, ProxyError> {
    let (mut parts, body) = request.into_parts();
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Authority::from_str(&origin_authority(origin)).ok();
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(axum::http::uri::PathAndQuery::from_static("/"));
    }
    parts.uri = Uri::from_parts(uri_parts)?;
    // Upstreams are spoken to over HTTP/1.1 regardless of the inbound version.
    if parts.version == Version::HTTP_2 {
        parts.version = Version::HTTP_11;
    }
    Ok(HttpRequest::from_parts(parts, body))
}

/// `host[:port]` of an origin URL.
fn origin_authority(origin: &Url) -> String {
    let host = origin.host_str().unwrap_or("localhost");
    match origin.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
