//! pagehost configuration system.
//!
//! TOML-based configuration for the embedded page host: which custom scheme
//! serves the bundled page, the page-side entry points the host calls, how
//! look-and-feel changes are forwarded, and webview/logging settings. Every
//! section has defaults, so a partial (or missing) file works.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pagehost_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config.page.bootstrap_url());
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    bootstrap_url, BridgeConfig, LoggingConfig, PageConfig, PageHostConfig, ThemeConfig,
    WebViewSettings,
};

use pagehost_common::ConfigError;

/// Load config from the platform default path and validate it.
pub fn load_config() -> Result<PageHostConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &PageHostConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&PageHostConfig::default());
        for section in ["page", "bridge", "theme", "webview", "logging"] {
            assert!(json.contains(&format!("\"{section}\"")), "missing {section}");
        }
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = PageHostConfig::default();
        let json = config_to_json(&config);
        let parsed: PageHostConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.page.scheme, "pagehost");
        assert_eq!(parsed.theme.changed_argument, "green");
        assert_eq!(parsed.bridge.bootstrap_function, "initializePage");
    }
}
