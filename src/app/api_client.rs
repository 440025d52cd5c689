//! HTTP client for the scheduler API.
//!
//! Every outgoing request consults the region context before dispatch:
//! [`ApiClient::request_url`] appends `region=<id>` exactly when
//! [`RegionContext::should_embed_region_in_request`] says to, so the
//! region rules live in one place and the typed fetch methods stay thin.
//! URL construction is separate from dispatch so the attachment rules can
//! be exercised without a server.

use anyhow::{Context, Result};
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::config::ConsoleConfig;
use super::region_context::RegionContext;
use super::url_state::REGION_PARAM;

/// Header carrying the console token secret on authenticated requests.
pub const TOKEN_HEADER: &str = "X-Console-Token";

/// Subset of the agent self-description the console reads at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSelf {
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default)]
    pub member: serde_json::Value,
}

/// The caller's own token, as returned by token introspection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenSelf {
    #[serde(rename = "AccessorID")]
    pub accessor_id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub token_type: String,
    #[serde(rename = "Global", default)]
    pub global: bool,
}

pub struct ApiClient {
    base_url: Url,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        Self::new(&config.api_base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full request URL for an API path.
    ///
    /// Appends `region=<active>` when the context requires it for this
    /// path; region-agnostic endpoints and the default region never get
    /// the parameter. Query parameters already present in `path` are kept.
    pub fn request_url(&self, path: &str, ctx: &RegionContext) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .with_context(|| format!("Invalid request path: {}", path))?;

        if ctx.should_embed_region_in_request(path) {
            if let Some(region) = ctx.active_region_id() {
                url.query_pairs_mut().append_pair(REGION_PARAM, region);
            }
        }

        Ok(url)
    }

    /// GET an API path and decode the JSON response body.
    pub fn get_json(&self, path: &str, ctx: &RegionContext) -> Result<serde_json::Value> {
        let url = self.request_url(path, ctx)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Request to {} returned an error status", url))?;

        response.json().context("Failed to decode response body")
    }

    /// Fetch the cluster's region listing: a JSON array of region names.
    ///
    /// The regions endpoint is on the allow-list, so the request is never
    /// region-qualified. Callers feed the result into
    /// [`RegionContext::replace_registry`].
    pub fn fetch_regions(&self, ctx: &RegionContext) -> Result<Vec<String>> {
        let url = self.request_url("/v1/regions", ctx)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .context("Regions request returned an error status")?;

        response.json().context("Failed to decode region listing")
    }

    /// Fetch the local agent's self-description.
    pub fn fetch_agent_self(&self, ctx: &RegionContext) -> Result<AgentSelf> {
        let url = self.request_url("/v1/agent/self", ctx)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .context("Agent self request returned an error status")?;

        response.json().context("Failed to decode agent self")
    }

    /// Introspect a token secret. Used by sign-in to verify the secret
    /// the user entered before storing it.
    pub fn fetch_token_self(&self, secret: &str, ctx: &RegionContext) -> Result<TokenSelf> {
        let url = self.request_url("/v1/acl/token/self", ctx)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .header(TOKEN_HEADER, secret)
            .send()
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .context("Token introspection returned an error status")?;

        response.json().context("Failed to decode token self")
    }
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
    fn test_non_default_region_is_attached() {
        let client = ApiClient::new("http://127.0.0.1:4646").unwrap();
        let ctx = context(&["global", "region-2"], Some("region-2"));

        let url = client.request_url("/v1/jobs", &ctx).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:4646/v1/jobs?region=region-2");
    }

    #[test]
    fn test_default_region_is_not_attached() {
        let client = ApiClient::new("http://127.0.0.1:4646").unwrap();
        let ctx = context(&["global", "region-2"], Some("global"));

        let url = client.request_url("/v1/jobs", &ctx).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:4646/v1/jobs");
    }

    #[test]
    fn test_allow_listed_paths_are_never_attached() {
        let client = ApiClient::new("http://127.0.0.1:4646").unwrap();
        let ctx = context(&["global", "region-2"], Some("region-2"));

        for path in [
            "/v1/status/leader",
            "/v1/agent/self",
            "/v1/acl/token/self",
            "/v1/agent/members",
            "/v1/regions",
            "/v1/operator/license",
        ] {
            let url = client.request_url(path, &ctx).unwrap();
            assert!(url.query().is_none(), "unexpected query on {}", path);
        }
    }

    #[test]
    fn test_existing_query_params_are_kept() {
        let client = ApiClient::new("http://127.0.0.1:4646").unwrap();
        let ctx = context(&["global", "region-2"], Some("region-2"));

        let url = client
            .request_url("/v1/jobs?namespace=default", &ctx)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:4646/v1/jobs?namespace=default&region=region-2"
        );
    }

    #[test]
    fn test_no_selection_means_no_attachment() {
        let client = ApiClient::new("http://127.0.0.1:4646").unwrap();
        let ctx = context(&["global", "region-2"], None);

        let url = client.request_url("/v1/jobs", &ctx).unwrap();
        assert!(url.query().is_none());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(ApiClient::new("not a url").is_err());
    }

    #[test]
    fn test_token_self_decoding() {
        let token: TokenSelf = serde_json::from_str(
            r#"{
                "AccessorID": "b1f4c10e-fb4c-2222-8c55-5c7a8b3c4d5e",
                "Name": "Bootstrap Token",
                "Type": "management",
                "Global": true
            }"#,
        )
        .unwrap();

        assert_eq!(token.name, "Bootstrap Token");
        assert_eq!(token.token_type, "management");
        assert!(token.global);
    }
}
