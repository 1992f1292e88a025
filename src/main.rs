//! Asynchronous task-tracking API gateway.
//!
//! Forwards provider-prefixed requests (`/openai/...`, `/claude/...`) to
//! their upstream API origins without making the client wait for the
//! upstream to answer. Every proxied request is acknowledged immediately
//! with a task id; the outcome is collected by polling `/task/status`.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 TASK GATEWAY                  │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ──────────────────▶│  │  http   │──▶│ routing  │──▶│   tasks   │  │
//!                      │  │ server  │   │  table   │   │   store   │  │
//!                      │  └─────────┘   └──────────┘   └─────┬─────┘  │
//!   202 {taskId}       │       │                             │        │
//!   ◀──────────────────│───────┘                             │        │
//!                      │                                     ▼        │
//!   GET /task/status   │                              ┌───────────┐   │
//!   ◀─────────────────▶│                              │   proxy   │───┼──▶ Upstream
//!                      │                              │ forwarder │   │    Provider
//!                      │                              └───────────┘   │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐ │
//!                      │  │   config   observability   lifecycle    │ │
//!                      │  └─────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use task_gateway::config::{load_config, GatewayConfig};
use task_gateway::http::HttpServer;
use task_gateway::lifecycle::Shutdown;
use task_gateway::observability::metrics;

#[derive(Parser)]
#[command(name = "task-gateway")]
#[command(about = "Asynchronous task-tracking API gateway", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Built-in defaults are used when
    /// omitted.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration (built-in defaults when no file is given)
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    // Initialize tracing subscriber
    let default_filter = format!(
        "task_gateway={level},tower_http={level}",
        level = config.observability.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("task-gateway v0.1.0 starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstreams = config.upstreams.len(),
        task_expiry_ms = config.tasks.expiry_ms,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Wire Ctrl+C to the shutdown broadcast
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.trigger();
        }
    });

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
