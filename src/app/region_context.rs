//! Active-region state and the rules for exposing it.
//!
//! [`RegionContext`] is the single source of truth for "which region is
//! active" and the sole decision point for whether that region must be
//! visible in the URL, in persisted storage, and in outgoing API requests.
//! It is created once at console start and passed by reference into the
//! presentation and request layers; nothing reads an implicit singleton.
//!
//! # Resolution order
//!
//! On every navigation the active region resolves as:
//! 1. the URL's `region` query parameter, when it names a known region
//!    (this also persists the choice),
//! 2. else the persisted value, when it still names a known region,
//! 3. else the registry's default region.
//!
//! An unknown region id in the URL is logged and skipped; the region
//! subsystem never fails a navigation.

use anyhow::{bail, Result};
use tracing::{debug, info, warn};

use super::global_endpoints::GlobalEndpointRegistry;
use super::regions::RegionRegistry;
use super::storage::{KeyValueStorage, ACTIVE_REGION_KEY};

pub struct RegionContext {
    registry: RegionRegistry,
    endpoints: GlobalEndpointRegistry,
    storage: Box<dyn KeyValueStorage>,
    active_region_id: Option<String>,
}

impl std::fmt::Debug for RegionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionContext")
            .field("registry", &self.registry)
            .field("active_region_id", &self.active_region_id)
            .finish()
    }
}

impl RegionContext {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self {
            registry: RegionRegistry::new(),
            endpoints: GlobalEndpointRegistry::new(),
            storage,
            active_region_id: None,
        }
    }

    pub fn with_registry(registry: RegionRegistry, storage: Box<dyn KeyValueStorage>) -> Self {
        Self {
            registry,
            endpoints: GlobalEndpointRegistry::new(),
            storage,
            active_region_id: None,
        }
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    /// Replace the region set after a registry fetch.
    ///
    /// Invariant: the active region is always a member of the registry or
    /// unset, so a selection that vanished from the cluster is dropped here
    /// and re-resolved on the next navigation.
    pub fn replace_registry<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.replace(ids);
        if let Some(active) = &self.active_region_id {
            if !self.registry.contains(active) {
                debug!("Active region {} no longer registered, unsetting", active);
                self.active_region_id = None;
            }
        }
    }

    /// Add region-agnostic endpoints beyond the built-in allow-list.
    pub fn extend_global_endpoints<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints.extend(paths);
    }

    pub fn global_endpoints(&self) -> &GlobalEndpointRegistry {
        &self.endpoints
    }

    /// Session storage backing this context.
    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn KeyValueStorage {
        self.storage.as_mut()
    }

    /// The region currently in effect, if any selection has been made.
    pub fn active_region_id(&self) -> Option<&str> {
        self.active_region_id.as_deref()
    }

    pub fn default_region_id(&self) -> Option<&str> {
        self.registry.default_region_id()
    }

    pub fn is_multi_region(&self) -> bool {
        self.registry.is_multi_region()
    }

    /// Resolve the active region for a navigation.
    ///
    /// `url_region` is the `region` query parameter of the URL being
    /// navigated to, if present. A known URL value wins and is persisted;
    /// an unknown one is ignored. Otherwise the persisted value applies if
    /// still known, and the registry default last. Returns the resolved id.
    pub fn resolve_active_region(&mut self, url_region: Option<&str>) -> Option<String> {
        if let Some(requested) = url_region {
            if self.registry.contains(requested) {
                let requested = requested.to_string();
                self.activate(&requested, true);
                return Some(requested);
            }
            warn!(
                "URL names unknown region {:?}, falling back to stored/default resolution",
                requested
            );
        }

        if let Some(persisted) = self.storage.get(ACTIVE_REGION_KEY) {
            if self.registry.contains(&persisted) {
                self.activate(&persisted, false);
                return Some(persisted);
            }
            debug!("Persisted region {:?} is no longer registered", persisted);
        }

        let default = self.registry.default_region_id()?.to_string();
        self.activate(&default, false);
        Some(default)
    }

    /// Switch to a region by explicit user selection.
    ///
    /// Persists the choice. Re-selecting the region already active is a
    /// no-op: no storage write, no observable change.
    pub fn set_active_region(&mut self, id: &str) -> Result<()> {
        if !self.registry.contains(id) {
            bail!("unknown region: {}", id);
        }
        if self.active_region_id.as_deref() == Some(id) {
            debug!("Region {} already active, nothing to do", id);
            return Ok(());
        }
        info!("Switching active region to {}", id);
        self.activate(id, true);
        Ok(())
    }

    fn activate(&mut self, id: &str, persist: bool) {
        if self.active_region_id.as_deref() != Some(id) {
            self.active_region_id = Some(id.to_string());
        }
        if persist {
            self.storage.set(ACTIVE_REGION_KEY, id);
        }
    }

    /// Whether the current URL must carry the `region` query parameter.
    ///
    /// False when the active region is the default (or nothing is active),
    /// so the common case keeps a clean URL; true otherwise, so non-default
    /// regions are explicit and shareable.
    pub fn should_embed_region_in_url(&self) -> bool {
        match (&self.active_region_id, self.registry.default_region_id()) {
            (Some(active), Some(default)) => active != default,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Whether an outgoing request to `path` must carry `region=<id>`.
    ///
    /// Region-agnostic endpoints never do; everything else follows the URL
    /// rule, so only non-default regions are attached.
    pub fn should_embed_region_in_request(&self, path: &str) -> bool {
        if self.endpoints.is_region_agnostic(path) {
            return false;
        }
        self.should_embed_region_in_url()
    }
}
