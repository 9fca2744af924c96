//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Verbosity comes from LOG_LEVEL; RUST_LOG, when set, replaces the
//!   derived filter entirely
//! - Lifecycle events (config summary, listening, shutdown) are kept at
//!   info whatever LOG_LEVEL says
//! - Dependencies are held at warn so debug output stays one line per request

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogLevel;

/// Filter directives derived from the configured level.
pub fn directives(level: LogLevel) -> String {
    let lifecycle = match level {
        LogLevel::Debug => LogLevel::Debug,
        _ => LogLevel::Info,
    };
    format!("warn,dev_proxy={},dev_proxy::lifecycle={}", level, lifecycle)
}

/// Filter for `level`, ignoring RUST_LOG.
pub fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(directives(level))
}

pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| filter(level))
}

/// Install the global subscriber. Call once, from `main`.
pub fn init(level: LogLevel) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
