//! Startup orchestration.
//!
//! # Responsibilities
//! - Log the resolved configuration
//! - Start optional background services (metrics exporter)
//! - Bind the listener and log the effective routing
//! - Serve until SIGINT/SIGTERM, then stop
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Single path `Stopped → Binding → Listening → ShuttingDown → Stopped`;
//!   there is no restart without exiting
//! - In-flight requests are abandoned on shutdown, not drained
//! - Lifecycle log lines are emitted at info under `dev_proxy::lifecycle`,
//!   which the log filter keeps visible at every LOG_LEVEL

use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::schema::origin_str;
use crate::config::ProxyConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::{wait_for_signal, Signal};
use crate::observability::metrics;

/// Fatal errors while starting or running the proxy.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to install signal handlers: {0}")]
    Signal(#[source] std::io::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Process lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Stopped,
    Binding,
    Listening,
    ShuttingDown,
}

impl LifecycleState {
    /// The only state reachable from `self`.
    pub fn next(self) -> LifecycleState {
        match self {
            LifecycleState::Stopped => LifecycleState::Binding,
            LifecycleState::Binding => LifecycleState::Listening,
            LifecycleState::Listening => LifecycleState::ShuttingDown,
            LifecycleState::ShuttingDown => LifecycleState::Stopped,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Stopped => "stopped",
            LifecycleState::Binding => "binding",
            LifecycleState::Listening => "listening",
            LifecycleState::ShuttingDown => "shutting_down",
        };
        f.write_str(name)
    }
}

/// Tracks the current lifecycle state.
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Move to the next state and return it.
    pub fn advance(&mut self) -> LifecycleState {
        let next = self.state.next();
        tracing::debug!(from = %self.state, to = %next, "Lifecycle transition");
        self.state = next;
        next
    }
}

/// One-line summary of the resolved configuration.
pub fn announce_config(config: &ProxyConfig) {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "dev-proxy starting: {}",
        config
    );
}

/// Effective routing once the listener is bound.
pub fn announce_listening(local_addr: SocketAddr, config: &ProxyConfig) {
    tracing::info!(
        address = %local_addr,
        api_prefix = %config.api_path_prefix,
        api = %origin_str(&config.server_origin),
        client = %origin_str(&config.client_origin),
        "Proxy listening"
    );
}

pub fn announce_shutdown(signal: Signal) {
    tracing::info!(signal = %signal, "Shutting down");
}

/// Bind, serve, and stop on the first termination signal.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    let mut lifecycle = Lifecycle::default();
    announce_config(&config);

    if let Some(addr) = config.metrics_address {
        metrics::init_metrics(addr)?;
    }

    lifecycle.advance();
    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: bind_addr,
            source,
        })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| StartupError::Bind {
            addr: bind_addr,
            source,
        })?;

    lifecycle.advance();
    announce_listening(local_addr, &config);

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let serving = server.run(listener, shutdown.subscribe());
    tokio::pin!(serving);

    tokio::select! {
        result = &mut serving => {
            // The accept loop only ends on its own after an I/O failure.
            result.map_err(StartupError::Serve)?;
            lifecycle.advance();
        }
        signal = wait_for_signal() => {
            let signal = signal.map_err(StartupError::Signal)?;
            lifecycle.advance();
            announce_shutdown(signal);
            shutdown.trigger();
            serving.await.map_err(StartupError::Serve)?;
        }
    }

    lifecycle.advance();
    tracing::info!("Shutdown complete");
    Ok(())
}
