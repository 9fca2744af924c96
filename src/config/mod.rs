//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional shared config (TOML)     process environment
//!     → loader.rs::load_shared          │
//!     └──────────────┬──────────────────┘
//!                    → loader.rs::load_from (env → shared → default)
//!                    → validation.rs (typed parsing, fail fast)
//!                    → ProxyConfig (immutable, passed to server/lifecycle)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Every field has a default so an empty environment is valid
//! - Malformed values are rejected with the variable name, never coerced

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from, load_shared, ConfigError};
pub use schema::{LogLevel, ProxyConfig, SharedConfig};
