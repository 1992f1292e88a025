//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway handler
//!     → forwarder.rs build_upstream_request (method, headers, buffered body)
//!     → task created, forward() spawned, handler replies 202 immediately
//!     → forward() awaits the upstream exchange
//!     → JSON body    → task completed
//!     → any failure  → task failed, message captured
//! ```
//!
//! # Design Decisions
//! - The outbound request is fully constructed before dispatch, so
//!   construction failures surface synchronously as 500
//! - The spawned forwarder owns everything by value and is never awaited
//! - A single attempt is terminal; no retries, no upstream deadline

pub mod forwarder;

pub use forwarder::{build_upstream_request, forward, ForwardError};
