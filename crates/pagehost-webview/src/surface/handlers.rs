use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};
use crate::scheme::SchemeRegistry;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// URL prefixes the surface may navigate to. Everything else is blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPolicy {
    prefixes: Vec<String>,
}

impl NavigationPolicy {
    /// Allow the bundled origin (including the WebView2 `http://scheme.host/`
    /// rewrite), `about:blank`, and `extra` prefixes.
    pub fn for_scheme(scheme: &str, host: &str, extra: &[String]) -> Self {
        let mut prefixes = vec![
            format!("{scheme}://{host}/"),
            format!("http://{scheme}.{host}/"),
            format!("https://{scheme}.{host}/"),
            "about:blank".to_string(),
        ];
        prefixes.extend(extra.iter().filter(|p| !p.is_empty()).cloned());
        Self { prefixes }
    }

    pub fn allows(&self, url: &str) -> bool {
        self.prefixes.iter().any(|prefix| url.starts_with(prefix))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

pub(super) type EventSink = Arc<Mutex<Vec<WebViewEvent>>>;

fn push(events: &EventSink, event: WebViewEvent) {
    events
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(event);
}

/// Take every queued event.
pub(super) fn drain(events: &EventSink) -> Vec<WebViewEvent> {
    std::mem::take(&mut *events.lock().unwrap_or_else(PoisonError::into_inner))
}

pub(super) fn attach_ipc_handler(builder: WebViewBuilder<'_>, events: EventSink) -> WebViewBuilder<'_> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();

        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
            return;
        }

        debug!(body_len = body.len(), "IPC message from page");
        push(&events, WebViewEvent::IpcMessage { body });
    })
}

pub(super) fn attach_page_load_handler(
    builder: WebViewBuilder<'_>,
    events: EventSink,
) -> WebViewBuilder<'_> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?state, url = %url, "page load");
        push(&events, WebViewEvent::PageLoad { state, url });
    })
}

pub(super) fn attach_title_handler(builder: WebViewBuilder<'_>, events: EventSink) -> WebViewBuilder<'_> {
    builder.with_document_title_changed_handler(move |title| {
        push(&events, WebViewEvent::TitleChanged { title });
    })
}

pub(super) fn attach_navigation_handler(
    builder: WebViewBuilder<'_>,
    events: EventSink,
    policy: NavigationPolicy,
) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(move |url| {
        if !policy.allows(&url) {
            warn!(url = %url, "navigation blocked: URL not in allowlist");
            push(&events, WebViewEvent::NavigationBlocked { url });
            return false;
        }

        debug!(url = %url, "navigation allowed");
        push(&events, WebViewEvent::NavigationRequested { url });
        true
    })
}

pub(super) fn attach_custom_protocol<'a>(
    builder: WebViewBuilder<'a>,
    scheme: &str,
    registry: SchemeRegistry,
) -> WebViewBuilder<'a> {
    builder.with_custom_protocol(scheme.to_string(), move |_webview_id, request| {
        let uri = request.uri().to_string();
        into_http_response(registry.respond(&uri))
    })
}

fn into_http_response(
    response: crate::scheme::SchemeResponse,
) -> wry::http::Response<std::borrow::Cow<'static, [u8]>> {
    use wry::http::{header, Response, StatusCode};

    let mut builder = Response::builder()
        .status(response.status)
        .header(header::CONTENT_TYPE, response.mime.as_str());
    if let Some(origin) = &response.origin {
        builder = builder.header(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.as_str());
    }

    builder
        .body(std::borrow::Cow::Owned(response.body))
        .unwrap_or_else(|e| {
            warn!(error = %e, "custom protocol: could not build response");
            let mut fallback = Response::new(std::borrow::Cow::Borrowed(&[][..]));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}

// =============================================================================
// TESTS
// =============================================================================
