//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check upstream prefixes are well-formed and unique
//! - Check upstream origins are absolute http(s) URLs
//! - Validate value ranges (expiry window > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic configuration error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("upstream prefix {0:?} must start with '/' and name at least one segment")]
    InvalidPrefix(String),

    #[error("duplicate upstream prefix {0:?}")]
    DuplicatePrefix(String),

    #[error("upstream origin {0:?} is not an absolute http(s) URL")]
    InvalidOrigin(String),

    #[error("task expiry window must be greater than zero")]
    ZeroExpiry,
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for upstream in &config.upstreams {
        if !upstream.prefix.starts_with('/') || upstream.prefix.len() < 2 {
            errors.push(ValidationError::InvalidPrefix(upstream.prefix.clone()));
        }
        if !seen.insert(upstream.prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix(upstream.prefix.clone()));
        }
        match Url::parse(&upstream.origin) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => errors.push(ValidationError::InvalidOrigin(upstream.origin.clone())),
        }
    }

    if config.tasks.expiry_ms == 0 {
        errors.push(ValidationError::ZeroExpiry);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
