use std::sync::{Arc, Mutex};

use pagehost_common::{Color, SurfaceError};
use pagehost_config::PageHostConfig;
use tracing::debug;
use wry::raw_window_handle;
use wry::{WebView, WebViewBuilder};

use crate::events::WebViewEvent;
use crate::ipc::IPC_INIT_SCRIPT;
use crate::scheme::SchemeRegistry;

use super::handlers::{
    attach_custom_protocol, attach_ipc_handler, attach_navigation_handler,
    attach_page_load_handler, attach_title_handler, drain, EventSink, NavigationPolicy,
};
use super::BrowserSurface;

/// Options for building a [`WrySurface`].
#[derive(Debug, Clone)]
pub struct WrySurfaceOptions {
    /// Custom scheme routed to the [`SchemeRegistry`].
    pub scheme: String,
    pub devtools: bool,
    pub user_agent: Option<String>,
    /// Initial fill color, painted before the host sets its own.
    pub background: Color,
    pub navigation: NavigationPolicy,
}

impl WrySurfaceOptions {
    pub fn from_config(config: &PageHostConfig, background: Color) -> Self {
        Self {
            scheme: config.page.scheme.clone(),
            devtools: config.webview.devtools,
            user_agent: config.webview.user_agent.clone(),
            background,
            navigation: NavigationPolicy::for_scheme(
                &config.page.scheme,
                &config.page.host,
                &config.webview.extra_allowed_origins,
            ),
        }
    }
}

/// [`BrowserSurface`] backed by a child `wry::WebView`.
pub struct WrySurface {
    webview: WebView,
    events: EventSink,
}

fn engine_error(e: wry::Error) -> SurfaceError {
    SurfaceError::Engine(e.to_string())
}

impl WrySurface {
    /// Create the webview as a child of `window`, positioned at `bounds`.
    ///
    /// No page is loaded; the host navigates once its scheme handler is
    /// registered.
    pub fn build_as_child<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        options: WrySurfaceOptions,
        registry: SchemeRegistry,
    ) -> Result<Self, SurfaceError> {
        let events: EventSink = Arc::new(Mutex::new(Vec::new()));

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(options.devtools)
            .with_background_color(options.background.to_tuple())
            .with_focused(false)
            .with_initialization_script(IPC_INIT_SCRIPT);

        if let Some(ua) = &options.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = attach_ipc_handler(builder, Arc::clone(&events));
        builder = attach_page_load_handler(builder, Arc::clone(&events));
        builder = attach_title_handler(builder, Arc::clone(&events));
        builder = attach_navigation_handler(builder, Arc::clone(&events), options.navigation);
        builder = attach_custom_protocol(builder, &options.scheme, registry);

        let webview = builder.build_as_child(window).map_err(engine_error)?;
        debug!(scheme = %options.scheme, "browser surface created");

        Ok(Self { webview, events })
    }

    /// Set the position and size within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), SurfaceError> {
        self.webview.set_bounds(bounds).map_err(engine_error)
    }

    pub fn set_visible(&self, visible: bool) -> Result<(), SurfaceError> {
        self.webview.set_visible(visible).map_err(engine_error)
    }

    pub fn open_devtools(&self) {
        self.webview.open_devtools();
    }

    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}

impl BrowserSurface for WrySurface {
    fn load_url(&self, url: &str) -> Result<(), SurfaceError> {
        self.webview.load_url(url).map_err(engine_error)
    }

    fn evaluate_script(&self, js: &str) -> Result<(), SurfaceError> {
        self.webview.evaluate_script(js).map_err(engine_error)
    }

    fn set_background_color(&self, color: Color) -> Result<(), SurfaceError> {
        self.webview
            .set_background_color(color.to_tuple())
            .map_err(engine_error)
    }

    fn focus(&self) -> Result<(), SurfaceError> {
        self.webview.focus().map_err(engine_error)
    }

    fn drain_events(&self) -> Vec<WebViewEvent> {
        drain(&self.events)
    }
}
