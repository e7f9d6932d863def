//! Built-in handlers for requests posted by the page.

use std::rc::Rc;

use pagehost_common::RequestError;
use pagehost_config::PageHostConfig;
use pagehost_webview::{IpcPayload, RequestRouter, ThemeBus, ThemeSource};
use serde_json::{json, Value};

/// Router answering `getTheme`, `getConfig` and `log`.
pub(super) fn build_router(config: &PageHostConfig, theme: Rc<ThemeBus>) -> RequestRouter {
    let page_config = page_config_json(config);
    RequestRouter::new()
        .on("getTheme", move |_| Ok(theme_json(theme.as_ref())))
        .on("getConfig", move |_| Ok(page_config.clone()))
        .on("log", forward_page_log)
}

fn theme_json(theme: &dyn ThemeSource) -> Value {
    let snapshot = theme.current();
    json!({
        "isDarkTheme": snapshot.is_dark(),
        "backgroundColor": snapshot.panel_background.to_hex(),
    })
}

/// The subset of the config the page needs.
fn page_config_json(config: &PageHostConfig) -> Value {
    json!({
        "version": env!("CARGO_PKG_VERSION"),
        "bootstrapUrl": config.page.bootstrap_url(),
        "changedEvent": config.theme.changed_event,
        "devtools": config.webview.devtools,
    })
}

/// Forward a page log line into `tracing`.
///
/// Accepts a plain string or `{ "level": ..., "message": ... }`.
fn forward_page_log(payload: &IpcPayload) -> Result<Value, RequestError> {
    let (level, message) = match payload {
        IpcPayload::Text(message) => ("info", message.as_str()),
        IpcPayload::Json(_) => {
            let message = payload.str_field("message").ok_or_else(|| {
                RequestError::InvalidPayload("log payload needs a 'message' string".into())
            })?;
            (payload.str_field("level").unwrap_or("info"), message)
        }
        IpcPayload::None => {
            return Err(RequestError::InvalidPayload("log payload is empty".into()));
        }
    };

    match level {
        "error" => tracing::error!(target: "pagehost::page", "{message}"),
        "warn" => tracing::warn!(target: "pagehost::page", "{message}"),
        "debug" => tracing::debug!(target: "pagehost::page", "{message}"),
        "trace" => tracing::trace!(target: "pagehost::page", "{message}"),
        _ => tracing::info!(target: "pagehost::page", "{message}"),
    }
    Ok(Value::Null)
}
