//! Registry of region-agnostic API endpoints.
//!
//! These endpoints answer for the cluster as a whole and must never be
//! qualified with a `region` query parameter. The built-in set covers the
//! endpoints the console always talks to; deployments extend it through
//! configuration rather than by touching the request layer.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static BUILT_IN_REGISTRY: Lazy<GlobalEndpointRegistry> = Lazy::new(GlobalEndpointRegistry::new);

/// Registry of API paths that operate across all regions.
/// These endpoints return the same data regardless of which region is active.
#[derive(Debug, Clone)]
pub struct GlobalEndpointRegistry {
    global_paths: HashSet<String>,
}

impl Default for GlobalEndpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalEndpointRegistry {
    pub fn new() -> Self {
        let mut registry = HashSet::new();

        // Cluster status - answered by whichever server holds leadership
        registry.insert("/v1/status/leader".to_string());

        // Agent introspection - local agent, not region-routed
        registry.insert("/v1/agent/self".to_string());
        registry.insert("/v1/agent/members".to_string());

        // Token introspection - resolves the caller's own token
        registry.insert("/v1/acl/token/self".to_string());

        // Region discovery and license - cluster-wide by definition
        registry.insert("/v1/regions".to_string());
        registry.insert("/v1/operator/license".to_string());

        Self {
            global_paths: registry,
        }
    }

    /// Add endpoints beyond the built-in set, e.g. from configuration.
    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            self.global_paths.insert(normalize_path(&path.into()));
        }
    }

    /// Check if an API path is region-agnostic.
    ///
    /// The query string and any trailing slash are ignored, so
    /// `/v1/agent/self?pretty=true` matches the `/v1/agent/self` entry.
    pub fn is_region_agnostic(&self, path: &str) -> bool {
        self.global_paths.contains(&normalize_path(path))
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    let path = path.trim_end_matches('/');
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Convenience function to check a path against the built-in set only.
pub fn is_region_agnostic_endpoint(path: &str) -> bool {
    BUILT_IN_REGISTRY.is_region_agnostic(path)
}
