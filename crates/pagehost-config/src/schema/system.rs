//! Webview and logging settings.

use serde::{Deserialize, Serialize};

/// Settings applied when the browser surface is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewSettings {
    /// Enable dev tools (on by default in debug builds).
    pub devtools: bool,
    pub user_agent: Option<String>,
    /// URL prefixes the page may navigate to in addition to the bundled scheme.
    pub extra_allowed_origins: Vec<String>,
}

impl Default for WebViewSettings {
    fn default() -> Self {
        Self {
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("PageHost/{}", env!("CARGO_PKG_VERSION"))),
            extra_allowed_origins: Vec::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl LoggingConfig {
    /// `tracing_subscriber` directive for this level.
    pub fn directive(&self) -> String {
        format!("pagehost={}", self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_directive() {
        let logging = LoggingConfig {
            level: "debug".into(),
        };
        assert_eq!(logging.directive(), "pagehost=debug");
    }

    #[test]
    fn webview_defaults() {
        let settings = WebViewSettings::default();
        assert!(settings.extra_allowed_origins.is_empty());
        assert!(settings
            .user_agent
            .as_deref()
            .is_some_and(|ua| ua.starts_with("PageHost/")));
    }
}
