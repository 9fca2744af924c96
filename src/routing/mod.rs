//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (classify)
//!     → matcher.rs (literal prefix test)
//!     → RoutingDecision { target: Api | Client, target_origin }
//! ```
//!
//! # Design Decisions
//! - Built once at startup from ProxyConfig, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same path always yields the same target

pub mod matcher;
pub mod router;

pub use router::{Router, RoutingDecision, Target};
