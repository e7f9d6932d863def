//! Look-and-feel forwarding configuration.

use serde::{Deserialize, Serialize};

/// How host theme changes reach the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Property name whose change notifications are forwarded.
    pub watched_property: String,
    /// Page-side function called on every forwarded change.
    pub changed_event: String,
    /// Literal argument passed to `changed_event`. It does not reflect the
    /// new theme; pages should re-query the host (`getTheme`) on receipt.
    pub changed_argument: String,
    /// Panel background used while the host is in dark mode.
    pub dark_background: String,
    /// Panel background used while the host is in light mode.
    pub light_background: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            watched_property: "lookAndFeel".into(),
            changed_event: "themeChanged".into(),
            changed_argument: "green".into(),
            dark_background: "#2b2d30".into(),
            light_background: "#f7f8fa".into(),
        }
    }
}
