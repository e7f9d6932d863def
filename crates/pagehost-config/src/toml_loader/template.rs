//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# pagehost configuration
# Only override what you want to change -- missing fields use defaults.

[page]
# scheme = "pagehost"          # custom scheme, never http/https/file/...
# host = "localhost"
# entry = "html/index.html"    # relative to assets_dir
# assets_dir = "assets"

[bridge]
# bootstrap_function = "initializePage"   # called with the dark-theme flag

[theme]
# watched_property = "lookAndFeel"
# changed_event = "themeChanged"
# changed_argument = "green"
# dark_background = "#2b2d30"
# light_background = "#f7f8fa"

[webview]
# devtools = false
# user_agent = "PageHost/0.1.0"
# extra_allowed_origins = []

[logging]
# level = "info"               # trace, debug, info, warn, error
"##
    .to_string()
}
