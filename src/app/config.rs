//! Console configuration loader.
//!
//! This module loads deployment configuration from a `console.json` file:
//! where the scheduler API lives, which extra endpoints are region-agnostic,
//! and what base string page titles start from.
//!
//! # console.json Format
//!
//! ```json
//! {
//!   "api_base_url": "https://cluster.example.com:4646",
//!   "region_agnostic_endpoints": ["/v1/operator/raft/configuration"],
//!   "page_title_base": "Cluster Console"
//! }
//! ```
//!
//! Every field except `api_base_url` is optional.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

fn default_page_title_base() -> String {
    "Cluster Console".to_string()
}

/// Console configuration loaded from console.json.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the scheduler API, e.g. "https://cluster.example.com:4646"
    pub api_base_url: String,

    /// Region-agnostic endpoints beyond the built-in allow-list
    #[serde(default)]
    pub region_agnostic_endpoints: Vec<String>,

    /// First component of every page title
    #[serde(default = "default_page_title_base")]
    pub page_title_base: String,
}

impl ConsoleConfig {
    /// Load console configuration from console.json in the current directory.
    ///
    /// Returns None if the file doesn't exist or is invalid.
    pub fn load() -> Option<Self> {
        Self::load_from_path("console.json")
    }

    /// Load console configuration from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!("No console.json found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<ConsoleConfig>(&contents) {
                Ok(config) => {
                    debug!(
                        "Loaded console config: api={}, {} extra global endpoints",
                        config.api_base_url,
                        config.region_agnostic_endpoints.len()
                    );
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse console.json: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read console.json: {}", e);
                None
            }
        }
    }
}
