//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request path
//!     → table.rs (prefix scan, configuration order)
//!     → Return: matched upstream + path remainder, or NoMatch
//!
//! Table Compilation (at startup):
//!     UpstreamConfig[]
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: first match wins, in configuration order
//! - Explicit no-match rather than silent default

pub mod table;

pub use table::{RouteMatch, RouteTable};
