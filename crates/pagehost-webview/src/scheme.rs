//! Custom URL scheme registry.
//!
//! Pages load their assets from a custom `scheme://host/` origin that is
//! answered from bundled resources instead of the network. A single
//! [`SchemeRegistry`] is shared by every host in the process; registration
//! is idempotent per `(scheme, host)` pair and reference counted, so several
//! hosts can share one handler and the handler goes away with the last one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pagehost_common::SchemeError;
use pagehost_config::validation::{is_valid_host, is_valid_scheme};
use tracing::{debug, warn};

/// A resource served for a custom scheme request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub mime: String,
    pub data: Vec<u8>,
}

impl Asset {
    pub fn new(mime: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            mime: mime.into(),
            data: data.into(),
        }
    }
}

/// Resolves request paths of a custom scheme to bundled resources.
pub trait SchemeHandler: Send + Sync {
    /// Serve `path` (relative, no leading slash, no query). `None` means 404.
    fn serve(&self, path: &str) -> Option<Asset>;
}

/// A request URI split into its scheme, host and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeUri {
    pub scheme: String,
    pub host: String,
    pub path: String,
}

/// Parse `scheme://host/path?query#fragment`.
///
/// WebView2 exposes custom schemes as `http://<scheme>.<host>/...`; that form
/// is mapped back to the custom scheme.
pub fn parse_scheme_uri(uri: &str) -> Option<SchemeUri> {
    let (scheme, rest) = uri.split_once("://")?;
    if scheme.is_empty() {
        return None;
    }
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let (host, path) = rest.split_once('/').unwrap_or((rest, ""));

    let scheme = scheme.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    if scheme == "http" || scheme == "https" {
        if let Some((custom, real_host)) = host.split_once('.') {
            return Some(SchemeUri {
                scheme: custom.to_string(),
                host: real_host.to_string(),
                path: path.to_string(),
            });
        }
    }

    Some(SchemeUri {
        scheme,
        host,
        path: path.to_string(),
    })
}

/// Response to a custom scheme request, independent of the webview backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeResponse {
    pub status: u16,
    pub mime: String,
    pub body: Vec<u8>,
    /// Value for `Access-Control-Allow-Origin`, when the request resolved.
    pub origin: Option<String>,
}

impl SchemeResponse {
    fn ok(asset: Asset, origin: String) -> Self {
        Self {
            status: 200,
            mime: asset.mime,
            body: asset.data,
            origin: Some(origin),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            mime: "text/plain".into(),
            body: message.as_bytes().to_vec(),
            origin: None,
        }
    }
}

type SchemeKey = (String, String);

struct Entry {
    handler: Arc<dyn SchemeHandler>,
    refs: usize,
}

#[derive(Default)]
struct RegistryState {
    entries: HashMap<SchemeKey, Entry>,
    registrations: usize,
}

/// Process-wide table of custom scheme handlers.
///
/// Cloning is cheap; clones share the same table. The webview's protocol
/// callback holds a clone and looks handlers up per request, so a handler
/// only has to be registered before the page is loaded, not before the
/// webview is built.
#[derive(Clone, Default)]
pub struct SchemeRegistry {
    inner: Arc<Mutex<RegistryState>>,
}

impl SchemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `handler` for `scheme://host/`.
    ///
    /// If the pair is already registered the existing handler is kept and
    /// its reference count is incremented. The returned guard releases the
    /// reference when dropped.
    pub fn register(
        &self,
        scheme: &str,
        host: &str,
        handler: Arc<dyn SchemeHandler>,
    ) -> Result<SchemeRegistration, SchemeError> {
        let scheme = scheme.to_ascii_lowercase();
        let host = host.to_ascii_lowercase();
        if !is_valid_scheme(&scheme) {
            return Err(SchemeError::InvalidScheme(scheme));
        }
        if !is_valid_host(&host) {
            return Err(SchemeError::InvalidHost(host));
        }

        let key = (scheme, host);
        let mut state = self.state();
        state.registrations += 1;
        match state.entries.get_mut(&key) {
            Some(entry) => {
                entry.refs += 1;
                debug!(
                    scheme = %key.0,
                    host = %key.1,
                    refs = entry.refs,
                    "scheme already registered, keeping existing handler"
                );
            }
            None => {
                debug!(scheme = %key.0, host = %key.1, "scheme handler registered");
                state.entries.insert(key.clone(), Entry { handler, refs: 1 });
            }
        }
        drop(state);

        Ok(SchemeRegistration {
            registry: self.clone(),
            key: Some(key),
        })
    }

    fn release(&self, key: &SchemeKey) {
        let mut state = self.state();
        let remove = match state.entries.get_mut(key) {
            Some(entry) => {
                entry.refs = entry.refs.saturating_sub(1);
                entry.refs == 0
            }
            None => false,
        };
        if remove {
            state.entries.remove(key);
            debug!(scheme = %key.0, host = %key.1, "scheme handler removed");
        }
    }

    pub fn is_registered(&self, scheme: &str, host: &str) -> bool {
        self.ref_count(scheme, host) > 0
    }

    /// Live references held on `scheme://host/`.
    pub fn ref_count(&self, scheme: &str, host: &str) -> usize {
        let key = (scheme.to_ascii_lowercase(), host.to_ascii_lowercase());
        self.state().entries.get(&key).map_or(0, |e| e.refs)
    }

    /// Total successful `register` calls over the registry's lifetime.
    pub fn registrations(&self) -> usize {
        self.state().registrations
    }

    /// Answer a request URI from the registered handlers.
    pub fn respond(&self, uri: &str) -> SchemeResponse {
        let Some(parsed) = parse_scheme_uri(uri) else {
            warn!(uri, "custom protocol: malformed request URI");
            return SchemeResponse::error(400, "Bad Request");
        };

        let handler = self
            .state()
            .entries
            .get(&(parsed.scheme.clone(), parsed.host.clone()))
            .map(|e| Arc::clone(&e.handler));

        let Some(handler) = handler else {
            warn!(
                scheme = %parsed.scheme,
                host = %parsed.host,
                "custom protocol: no handler registered"
            );
            return SchemeResponse::error(404, "Not Found");
        };

        match handler.serve(&parsed.path) {
            Some(asset) => {
                let origin = format!("{}://{}", parsed.scheme, parsed.host);
                SchemeResponse::ok(asset, origin)
            }
            None => {
                warn!(path = %parsed.path, "custom protocol: asset not found");
                SchemeResponse::error(404, "Not Found")
            }
        }
    }
}

/// Guard for one reference on a scheme registration.
#[must_use = "dropping the registration releases the scheme handler"]
pub struct SchemeRegistration {
    registry: SchemeRegistry,
    key: Option<SchemeKey>,
}

impl SchemeRegistration {
    pub fn scheme(&self) -> &str {
        self.key.as_ref().map_or("", |k| k.0.as_str())
    }

    pub fn host(&self) -> &str {
        self.key.as_ref().map_or("", |k| k.1.as_str())
    }

    /// Release the reference now instead of at drop.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(key) = self.key.take() {
            self.registry.release(&key);
        }
    }
}

impl Drop for SchemeRegistration {
    fn drop(&mut self) {
        self.release_inner();
    }
}
