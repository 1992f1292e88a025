//! Task tracking subsystem.
//!
//! # Data Flow
//! ```text
//! Proxied request arrives
//!     → store.rs create() → pending record, id returned to caller
//!     → forwarder resolves upstream call
//!     → store.rs update() → completed or failed, timestamp refreshed
//!     → caller polls /task/status → store.rs get() snapshot
//!     → sweep() removes records past the expiry window
//! ```
//!
//! # Design Decisions
//! - The store exclusively owns task records; the forwarder holds only the id
//! - One pending → terminal transition per task, then removal by sweep
//! - Sweep runs opportunistically on every inbound request, no timer thread
//! - Lookup after removal is indistinguishable from an id that never existed

pub mod store;

pub use store::{now_ms, TaskRecord, TaskStatus, TaskStore};
