//! Syntax checks shared by the section validators.

use regex::Regex;
use std::sync::LazyLock;

/// RFC 3986 scheme, restricted to lowercase.
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9+.\-]*$").unwrap());

/// A single DNS label.
static HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([a-z0-9\-]{0,61}[a-z0-9])?$").unwrap());

/// `name` or `ns.name.fn` made of JavaScript identifiers.
static JS_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap()
});

/// Schemes the browser engine resolves itself; these cannot be served from
/// bundled resources.
pub const STANDARD_SCHEMES: &[&str] = &[
    "http",
    "https",
    "file",
    "data",
    "blob",
    "javascript",
    "about",
    "ws",
    "wss",
    "ftp",
];

pub fn is_valid_scheme(scheme: &str) -> bool {
    SCHEME_RE.is_match(scheme) && !STANDARD_SCHEMES.contains(&scheme)
}

pub fn is_valid_host(host: &str) -> bool {
    HOST_RE.is_match(host)
}

pub fn is_js_identifier_path(name: &str) -> bool {
    JS_PATH_RE.is_match(name)
}
