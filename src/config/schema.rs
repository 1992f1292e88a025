//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Upstream providers, matched against request paths in order.
    pub upstreams: Vec<UpstreamConfig>,

    /// Task store settings.
    pub tasks: TaskConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstreams: default_upstreams(),
            tasks: TaskConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum inbound request body size in bytes.
    ///
    /// Bodies are buffered in full before the upstream call is dispatched,
    /// so this bounds per-request memory.
    pub max_body_size: usize,

    /// Inbound request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
            request_timeout_secs: 30,
        }
    }
}

/// One upstream provider: a path prefix and the origin it forwards to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Path prefix that selects this provider (e.g., "/openai").
    pub prefix: String,

    /// Upstream origin the remaining path is appended to
    /// (e.g., "https://api.openai.com").
    pub origin: String,
}

impl UpstreamConfig {
    fn new(prefix: &str, origin: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            origin: origin.to_string(),
        }
    }
}

/// The built-in provider table, used when no config file overrides it.
pub fn default_upstreams() -> Vec<UpstreamConfig> {
    vec![
        UpstreamConfig::new("/discord", "https://discord.com/api"),
        UpstreamConfig::new("/telegram", "https://api.telegram.org"),
        UpstreamConfig::new("/openai", "https://api.openai.com"),
        UpstreamConfig::new("/claude", "https://api.anthropic.com"),
        UpstreamConfig::new("/gemini", "https://generativelanguage.googleapis.com"),
        UpstreamConfig::new("/meta", "https://www.meta.ai/api"),
        UpstreamConfig::new("/groq", "https://api.groq.com"),
        UpstreamConfig::new("/x", "https://api.x.ai"),
        UpstreamConfig::new("/cohere", "https://api.cohere.ai"),
        UpstreamConfig::new("/huggingface", "https://api-inference.huggingface.co"),
        UpstreamConfig::new("/together", "https://api.together.xyz"),
        UpstreamConfig::new("/novita", "https://api.novita.ai"),
        UpstreamConfig::new("/portkey", "https://api.portkey.ai"),
        UpstreamConfig::new("/fireworks", "https://api.fireworks.ai"),
        UpstreamConfig::new("/openrouter", "https://openrouter.ai/api"),
    ]
}

/// Task store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Tasks untouched for longer than this are removed by the sweep.
    pub expiry_ms: u64,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            expiry_ms: 3_600_000, // 1 hour
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
