//! Prefix table lookup.
//!
//! # Responsibilities
//! - Store the provider prefix table
//! - Split a request path into matched prefix and remainder
//! - Return matched upstream or explicit no-match

use crate::config::UpstreamConfig;

/// A successful route lookup.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// The provider prefix that matched.
    pub prefix: &'a str,

    /// Upstream origin the request is forwarded to.
    pub origin: &'a str,

    /// Path remainder, appended to the origin to form the target URL.
    pub suffix: &'a str,
}

/// Immutable mapping from provider prefixes to upstream origins.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<(String, String)>,
}

impl RouteTable {
    /// Compile the table from configuration, preserving order.
    pub fn from_config(upstreams: &[UpstreamConfig]) -> Self {
        Self {
            entries: upstreams
                .iter()
                .map(|u| (u.prefix.clone(), u.origin.clone()))
                .collect(),
        }
    }

    /// Resolve a request path against the table.
    ///
    /// Scans entries in configuration order and returns on the first prefix
    /// match. `None` means the path is not a proxy route.
    pub fn resolve<'a>(&'a self, path: &'a str) -> Option<RouteMatch<'a>> {
        for (prefix, origin) in &self.entries {
            if path.starts_with(prefix.as_str()) {
                return Some(RouteMatch {
                    prefix,
                    origin,
                    suffix: &path[prefix.len()..],
                });
            }
        }
        None
    }

    /// Number of configured upstreams.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
