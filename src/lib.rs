//! Asynchronous task-tracking API gateway library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;
pub mod tasks;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
