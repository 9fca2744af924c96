//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config already loaded → Bind listener → Log routing → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Release upstream pool → Exit 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run, Lifecycle, LifecycleState, StartupError};
