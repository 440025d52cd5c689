//! Synchronization of the `region` query parameter with the region context.
//!
//! The console keeps URLs clean: the `region` parameter appears only when
//! the active region is not the default, and it is the only parameter this
//! module touches. Mutation happens only when the computed state differs
//! from what the URL already carries, so repeated synchronization of the
//! same state never produces a second navigation.

use url::Url;

use super::region_context::RegionContext;

/// Query parameter carrying the region identifier.
pub const REGION_PARAM: &str = "region";

/// Extract the `region` query parameter from a URL.
pub fn region_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == REGION_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Bring the URL's `region` parameter in line with the context.
///
/// Inserts or replaces `region=<active>` when the context says to embed,
/// removes the parameter otherwise. All other query parameters are
/// preserved. Returns true when the URL was actually changed.
pub fn sync_region_param(url: &mut Url, ctx: &RegionContext) -> bool {
    let desired = if ctx.should_embed_region_in_url() {
        ctx.active_region_id().map(str::to_string)
    } else {
        None
    };

    if region_from_url(url) == desired {
        return false;
    }

    let other_params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != REGION_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.set_query(None);
    if !other_params.is_empty() || desired.is_some() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &other_params {
            pairs.append_pair(key, value);
        }
        if let Some(region) = &desired {
            pairs.append_pair(REGION_PARAM, region);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::regions::RegionRegistry;
    use crate::app::storage::MemoryStorage;

    fn context(ids: &[&str], active: Option<&str>) -> RegionContext {
        let mut ctx = RegionContext::with_registry(
            RegionRegistry::from_ids(ids.iter().copied()),
            Box::new(MemoryStorage::new()),
        );
        if let Some(id) = active {
            ctx.set_active_region(id).unwrap();
        }
        ctx
    }

    #[test]
    fn test_default_region_keeps_url_clean() {
        let ctx = context(&["global", "region-2"], Some("global"));
        let mut url = Url::parse("https://console.example.com/jobs").unwrap();

        assert!(!sync_region_param(&mut url, &ctx));
        assert_eq!(url.as_str(), "https://console.example.com/jobs");
    }

    #[test]
    fn test_non_default_region_is_embedded() {
        let ctx = context(&["global", "region-2"], Some("region-2"));
        let mut url = Url::parse("https://console.example.com/jobs").unwrap();

        assert!(sync_region_param(&mut url, &ctx));
        assert_eq!(
            url.as_str(),
            "https://console.example.com/jobs?region=region-2"
        );
    }

    #[test]
    fn test_switching_back_to_default_strips_param() {
        let mut ctx = context(&["global", "region-2"], Some("region-2"));
        let mut url = Url::parse("https://console.example.com/jobs?region=region-2").unwrap();

        ctx.set_active_region("global").unwrap();
        assert!(sync_region_param(&mut url, &ctx));
        assert_eq!(url.as_str(), "https://console.example.com/jobs");
    }

    #[test]
    fn test_other_query_params_are_preserved() {
        let ctx = context(&["global", "region-2"], Some("region-2"));
        let mut url =
            Url::parse("https://console.example.com/jobs?namespace=default&sort=name").unwrap();

        assert!(sync_region_param(&mut url, &ctx));
        assert_eq!(region_from_url(&url).as_deref(), Some("region-2"));
        assert!(url.query().unwrap().contains("namespace=default"));
        assert!(url.query().unwrap().contains("sort=name"));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let ctx = context(&["global", "region-2"], Some("region-2"));
        let mut url = Url::parse("https://console.example.com/jobs").unwrap();

        assert!(sync_region_param(&mut url, &ctx));
        assert!(!sync_region_param(&mut url, &ctx));
        assert_eq!(
            url.as_str(),
            "https://console.example.com/jobs?region=region-2"
        );
    }
}
