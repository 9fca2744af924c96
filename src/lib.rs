//! Development reverse proxy.
//!
//! One listener in front of two upstreams: requests whose path starts with
//! the API prefix go to the API server, everything else goes to the client
//! dev server. Requests and responses pass through unmodified.
//!
//! ```text
//!                     ┌──────────────────────────────────────────┐
//!   Client Request    │  ┌────────┐   ┌─────────┐   ┌─────────┐  │   /api/*   ┌────────────┐
//!  ───────────────────┼─▶│  http  │──▶│ routing │──▶│ pooled  │──┼───────────▶│ API server │
//!                     │  │ server │   │ prefix  │   │ client  │  │            └────────────┘
//!  ◀──────────────────┼──│        │◀──│         │◀──│         │──┼───────────▶┌────────────┐
//!   Client Response   │  └────────┘   └─────────┘   └─────────┘  │   other    │ UI server  │
//!                     │  config · lifecycle · observability      │            └────────────┘
//!                     └──────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
