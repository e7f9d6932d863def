//! Bundled content served through the custom scheme.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::scheme::{Asset, SchemeHandler};

/// Page served for an empty request path.
const INDEX_FILE: &str = "index.html";

/// Serves files below a base directory.
///
/// A request for `pagehost://localhost/html/index.html` is resolved to
/// `{base_dir}/html/index.html`. In-memory overrides take precedence over
/// the filesystem.
pub struct ContentProvider {
    base_dir: PathBuf,
    overrides: HashMap<String, Asset>,
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Register an in-memory asset (for generated content).
    pub fn add_override(
        &mut self,
        path: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        let path = path.into();
        self.overrides.insert(
            path.trim_start_matches('/').to_string(),
            Asset::new(mime, data),
        );
    }

    /// Resolve a request path to an asset.
    pub fn resolve(&self, path: &str) -> Option<Asset> {
        let mut clean = path.trim_start_matches('/');
        if clean.is_empty() {
            clean = INDEX_FILE;
        }

        if let Some(asset) = self.overrides.get(clean) {
            return Some(asset.clone());
        }

        let file_path = self.base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot escape the base.
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        trace!(path = clean, bytes = data.len(), "serving bundled asset");
        Some(Asset::new(mime_from_extension(&file_path), data))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl SchemeHandler for ContentProvider {
    fn serve(&self, path: &str) -> Option<Asset> {
        self.resolve(path)
    }
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") | Some("map") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("wasm") => "application/wasm",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
