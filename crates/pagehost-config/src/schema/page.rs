//! Bundled page location.

use serde::{Deserialize, Serialize};

/// Where the embedded page is served from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Custom URL scheme answered from bundled resources.
    pub scheme: String,
    /// Host part of the custom scheme URLs.
    pub host: String,
    /// Entry point path, relative to the assets directory.
    pub entry: String,
    /// Assets directory. Relative paths resolve against the working directory.
    pub assets_dir: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scheme: "pagehost".into(),
            host: "localhost".into(),
            entry: "html/index.html".into(),
            assets_dir: "assets".into(),
        }
    }
}

impl PageConfig {
    /// The URL the surface loads at startup, e.g. `pagehost://localhost/html/index.html`.
    pub fn bootstrap_url(&self) -> String {
        bootstrap_url(&self.scheme, &self.host, &self.entry)
    }
}

/// `scheme://host/entry`, with any leading `/` of `entry` dropped.
pub fn bootstrap_url(scheme: &str, host: &str, entry: &str) -> String {
    format!("{scheme}://{host}/{}", entry.trim_start_matches('/'))
}
