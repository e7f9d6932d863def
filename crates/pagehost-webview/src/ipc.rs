//! Message protocol between the host and the embedded page.
//!
//! Messages flow in both directions:
//! - **page -> host**: the page calls `window.pagehost.ipc.send(kind, payload)`
//!   or `window.pagehost.ipc.request(kind, payload)`, which post a JSON
//!   envelope through `window.ipc.postMessage`. Requests carry a numeric `id`
//!   and receive exactly one reply.
//! - **host -> page**: the host evaluates script generated by the helpers
//!   below. Every identifier and value is JSON-encoded before interpolation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A message posted by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type / request name.
    pub kind: String,
    #[serde(default)]
    pub payload: IpcPayload,
    /// Correlation id; present when the page awaits a reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

/// Payload of an IPC message: a plain string or structured JSON.
///
/// A JSON `null` (what `ipc.send(kind)` posts) reads as [`IpcPayload::None`].
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    Json(Value),
    #[default]
    None,
}

impl<'de> Deserialize<'de> for IpcPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => IpcPayload::None,
            Value::String(text) => IpcPayload::Text(text),
            other => IpcPayload::Json(other),
        })
    }
}

impl IpcPayload {
    /// The payload as a JSON value (`null` when absent).
    pub fn to_value(&self) -> Value {
        match self {
            IpcPayload::Text(s) => Value::String(s.clone()),
            IpcPayload::Json(v) => v.clone(),
            IpcPayload::None => Value::Null,
        }
    }

    /// Look up a string field of a JSON object payload.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        match self {
            IpcPayload::Json(obj) => obj.get(field).and_then(Value::as_str),
            _ => None,
        }
    }
}

impl IpcMessage {
    /// Parse an envelope from the raw `postMessage` body.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn text(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Text(text.into()),
            id: None,
        }
    }

    pub fn json(kind: impl Into<String>, value: Value) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Json(value),
            id: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Installs `window.pagehost.ipc` in every document before page scripts run.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.pagehost = window.pagehost || {};
    if (window.pagehost.ipc) {
        return;
    }
    var pending = {};
    var nextId = 1;
    function post(envelope) {
        window.ipc.postMessage(JSON.stringify(envelope));
    }
    window.pagehost.ipc = {
        send: function(kind, payload) {
            post({ kind: kind, payload: payload === undefined ? null : payload });
        },
        request: function(kind, payload) {
            var id = nextId++;
            return new Promise(function(resolve, reject) {
                pending[id] = { resolve: resolve, reject: reject };
                post({ kind: kind, payload: payload === undefined ? null : payload, id: id });
            });
        },
        // Callbacks registered by page code for host-initiated messages
        _handlers: {},
        on: function(kind, callback) {
            this._handlers[kind] = callback;
        },
        _dispatch: function(kind, payload) {
            var handler = this._handlers[kind];
            if (handler) {
                handler(payload);
            }
        },
        _resolve: function(id, value) {
            var entry = pending[id];
            if (entry) {
                delete pending[id];
                entry.resolve(value);
            }
        },
        _reject: function(id, message) {
            var entry = pending[id];
            if (entry) {
                delete pending[id];
                entry.reject(new Error(message));
            }
        }
    };
})();
"#;

fn to_js<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Script that delivers a message to a handler registered with `ipc.on`.
pub fn js_dispatch_message(kind: &str, payload: &Value) -> String {
    format!(
        "window.pagehost.ipc._dispatch({}, {});",
        to_js(kind),
        to_js(payload),
    )
}

/// Script that fulfils the page request `id` with `value`.
pub fn js_resolve_request(id: u64, value: &Value) -> String {
    format!("window.pagehost.ipc._resolve({id}, {});", to_js(value))
}

/// Script that rejects the page request `id` with `message`.
pub fn js_reject_request(id: u64, message: &str) -> String {
    format!("window.pagehost.ipc._reject({id}, {});", to_js(message))
}

/// Script that calls the page function at `path` (e.g. `themeChanged` or
/// `app.theme.update`) with `args`. Does nothing when the function is not
/// defined, so calls made before the page finished loading are harmless.
pub fn js_call_function(path: &str, args: &[Value]) -> String {
    let segments: Vec<&str> = path.split('.').collect();
    format!(
        "(function() {{ \
            var target = window, owner = null, path = {}; \
            for (var i = 0; i < path.length && target != null; i++) {{ owner = target; target = target[path[i]]; }} \
            if (typeof target === 'function') {{ target.apply(owner, {}); }} \
        }})();",
        to_js(&segments),
        to_js(args),
    )
}

/// Script that calls the page bootstrap function with the dark-theme flag.
pub fn js_bootstrap_call(function: &str, is_dark: bool) -> String {
    js_call_function(function, &[Value::Bool(is_dark)])
}
