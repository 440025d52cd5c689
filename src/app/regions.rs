//! Region registry and default-region resolution.
//!
//! The registry holds the ordered set of regions the cluster exposes,
//! as reported by the regions-listing endpoint (a JSON array of region
//! names). Exactly one region is the default: the one named `global` by
//! convention, or the sole region when only one exists. Every region
//! decision in the console resolves against this registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conventional name of the default region in a federated cluster.
pub const DEFAULT_REGION_NAME: &str = "global";

/// A single cluster region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
}

impl Region {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Ordered set of known regions, unique by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionRegistry {
    regions: Vec<Region>,
    fetched_at: Option<DateTime<Utc>>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from region ids, preserving order and dropping
    /// duplicates.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        registry.replace(ids);
        registry
    }

    /// Replace the region set with a freshly fetched listing.
    pub fn replace<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions.clear();
        for id in ids {
            let id = id.into();
            if !self.contains(&id) {
                self.regions.push(Region::new(id));
            }
        }
        self.fetched_at = Some(Utc::now());
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.regions.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Whether the console should offer a region switcher at all.
    pub fn is_multi_region(&self) -> bool {
        self.regions.len() > 1
    }

    /// The region implicitly assumed when none is specified.
    ///
    /// The region named `global` when present; otherwise the sole region of
    /// a single-region registry. A multi-region registry without `global`
    /// falls back to its first region. None for an empty registry.
    pub fn default_region_id(&self) -> Option<&str> {
        if self.contains(DEFAULT_REGION_NAME) {
            return Some(DEFAULT_REGION_NAME);
        }
        self.regions.first().map(|r| r.id.as_str())
    }

    /// Check if the region listing is older than the threshold and should
    /// be refetched. A registry that was never fetched is stale.
    pub fn is_stale(&self, stale_threshold_minutes: i64) -> bool {
        match self.fetched_at {
            Some(fetched_at) => {
                let age = Utc::now().signed_duration_since(fetched_at);
                age.num_minutes() > stale_threshold_minutes
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region_prefers_global() {
        let registry = RegionRegistry::from_ids(["region-2", "global", "region-3"]);
        assert_eq!(registry.default_region_id(), Some("global"));
    }

    #[test]
    fn test_sole_region_is_default_regardless_of_name() {
        let registry = RegionRegistry::from_ids(["some-region"]);
        assert_eq!(registry.default_region_id(), Some("some-region"));
        assert!(!registry.is_multi_region());
    }

    #[test]
    fn test_multi_region_without_global_falls_back_to_first() {
        let registry = RegionRegistry::from_ids(["region-a", "region-b"]);
        assert_eq!(registry.default_region_id(), Some("region-a"));
        assert!(registry.is_multi_region());
    }

    #[test]
    fn test_empty_registry_has_no_default() {
        let registry = RegionRegistry::new();
        assert_eq!(registry.default_region_id(), None);
        assert!(!registry.is_multi_region());
    }

    #[test]
    fn test_replace_dedupes_and_preserves_order() {
        let registry = RegionRegistry::from_ids(["global", "region-2", "global"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["global", "region-2"]);
    }

    #[test]
    fn test_unfetched_registry_is_stale() {
        let registry = RegionRegistry::new();
        assert!(registry.is_stale(15));

        let fetched = RegionRegistry::from_ids(["global"]);
        assert!(!fetched.is_stale(15));
    }
}
