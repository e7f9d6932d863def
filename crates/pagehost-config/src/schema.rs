//! Configuration schema for pagehost.
//!
//! Split into sub-modules by concern; everything is re-exported here.

mod bridge;
mod page;
mod system;
mod theme;

pub use bridge::BridgeConfig;
pub use page::{bootstrap_url, PageConfig};
pub use system::{LoggingConfig, WebViewSettings};
pub use theme::ThemeConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageHostConfig {
    pub page: PageConfig,
    pub bridge: BridgeConfig,
    pub theme: ThemeConfig,
    pub webview: WebViewSettings,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: PageHostConfig = toml::from_str("").unwrap();
        assert_eq!(config.page.host, "localhost");
        assert_eq!(config.theme.watched_property, "lookAndFeel");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_section_keeps_other_fields() {
        let config: PageHostConfig = toml::from_str(
            r#"
[theme]
changed_argument = "blue"
"#,
        )
        .unwrap();
        assert_eq!(config.theme.changed_argument, "blue");
        assert_eq!(config.theme.changed_event, "themeChanged");
    }
}
