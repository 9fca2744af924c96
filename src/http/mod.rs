//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, fallback handler)
//!     → [routing layer picks API or client origin]
//!     → server.rs::retarget (scheme + authority only)
//!     → pooled hyper-util client
//!     → response.rs (passthrough or proxy error)
//!     → websocket.rs (on 101, tunnel the upgraded connection)
//!     → Send to client
//! ```

pub mod response;
pub mod server;
pub mod websocket;

pub use response::PROXY_ERROR_PREFIX;
pub use server::HttpServer;
