//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → handlers.rs (sweep, then built-ins / status / proxy dispatch)
//!     → [routing table picks the upstream]
//!     → [forwarder runs detached; caller gets the task id]
//!     → Send response to client
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
