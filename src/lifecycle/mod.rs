//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Initialize subsystems → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or test trigger → broadcast → server drains and exits
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
