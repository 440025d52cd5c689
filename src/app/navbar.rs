//! View-models for the navbar region controls and the page title.
//!
//! The rendering shell consumes these values as-is; this crate decides
//! what to show, the shell decides how. Selecting an option in the
//! rendered switcher calls back into
//! [`RegionContext::set_active_region`](super::region_context::RegionContext::set_active_region).

use super::region_context::RegionContext;
use super::regions::DEFAULT_REGION_NAME;

/// What the navbar shows for regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionIndicator {
    /// No regions registered, or the only region is the conventional
    /// default. Nothing is rendered.
    Hidden,
    /// Exactly one region with a non-default name: a static,
    /// non-interactive label naming it.
    SingleRegion(String),
    /// Two or more regions: an interactive switcher.
    Switcher {
        regions: Vec<String>,
        active: Option<String>,
    },
}

impl RegionIndicator {
    pub fn for_context(ctx: &RegionContext) -> Self {
        let registry = ctx.registry();

        if registry.is_multi_region() {
            return RegionIndicator::Switcher {
                regions: registry.ids().map(str::to_string).collect(),
                active: ctx.active_region_id().map(str::to_string),
            };
        }

        match registry.ids().next() {
            Some(DEFAULT_REGION_NAME) | None => RegionIndicator::Hidden,
            Some(sole) => RegionIndicator::SingleRegion(sole.to_string()),
        }
    }

    pub fn is_switcher(&self) -> bool {
        matches!(self, RegionIndicator::Switcher { .. })
    }
}

/// Label shown on the switcher control itself.
pub fn switcher_label(ctx: &RegionContext) -> String {
    match ctx.active_region_id() {
        Some(active) => format!("Region: {}", active),
        None => "Select a Region".to_string(),
    }
}

/// Document title for the current page.
///
/// Multi-region consoles suffix the active region so browser tabs and
/// history entries are distinguishable; single-region consoles do not.
pub fn page_title(base: &str, ctx: &RegionContext) -> String {
    match ctx.active_region_id() {
        Some(active) if ctx.is_multi_region() => format!("{} - {}", base, active),
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::regions::RegionRegistry;
    use crate::app::storage::MemoryStorage;

    fn context(ids: &[&str]) -> RegionContext {
        RegionContext::with_registry(
            RegionRegistry::from_ids(ids.iter().copied()),
            Box::new(MemoryStorage::new()),
        )
    }

    #[test]
    fn test_sole_default_region_hides_everything() {
        let ctx = context(&["global"]);
        assert_eq!(RegionIndicator::for_context(&ctx), RegionIndicator::Hidden);
    }

    #[test]
    fn test_sole_named_region_shows_static_label() {
        let ctx = context(&["some-region"]);
        assert_eq!(
            RegionIndicator::for_context(&ctx),
            RegionIndicator::SingleRegion("some-region".to_string())
        );
    }

    #[test]
    fn test_empty_registry_hides_everything() {
        let ctx = context(&[]);
        assert_eq!(RegionIndicator::for_context(&ctx), RegionIndicator::Hidden);
    }

    #[test]
    fn test_multi_region_shows_switcher() {
        let mut ctx = context(&["global", "region-2"]);
        ctx.set_active_region("global").unwrap();

        let indicator = RegionIndicator::for_context(&ctx);
        assert!(indicator.is_switcher());
        assert_eq!(
            indicator,
            RegionIndicator::Switcher {
                regions: vec!["global".to_string(), "region-2".to_string()],
                active: Some("global".to_string()),
            }
        );
    }

    #[test]
    fn test_switcher_label_before_and_after_selection() {
        let mut ctx = context(&["global", "region-2"]);
        assert_eq!(switcher_label(&ctx), "Select a Region");

        ctx.set_active_region("global").unwrap();
        assert_eq!(switcher_label(&ctx), "Region: global");
    }

    #[test]
    fn test_page_title_suffix_only_when_multi_region() {
        let mut multi = context(&["global", "region-2"]);
        multi.resolve_active_region(None);
        assert_eq!(page_title("Jobs", &multi), "Jobs - global");

        let mut single = context(&["global"]);
        single.resolve_active_region(None);
        assert_eq!(page_title("Jobs", &single), "Jobs");
    }
}
