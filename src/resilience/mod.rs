//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (deadline on response headers)
//!     → On expiry: ProxyError::Timeout → 504
//! ```
//!
//! # Design Decisions
//! - One attempt per request: no retries, no circuit breaking
//! - Every upstream call has a deadline unless explicitly disabled

pub mod timeouts;
