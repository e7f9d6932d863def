//! `EmbeddedPageHost`: one browser surface showing the bundled page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use pagehost_common::Result;
use pagehost_config::PageHostConfig;
use serde_json::Value;
use tracing::{debug, info, trace, warn};

use crate::bridge::{Disposable, Disposer, HostToPageBridge, PageToHostBridge, RequestRouter};
use crate::events::WebViewEvent;
use crate::ipc::js_bootstrap_call;
use crate::scheme::{SchemeHandler, SchemeRegistration, SchemeRegistry};
use crate::surface::BrowserSurface;
use crate::theme::{ThemeEvent, ThemeSource, ThemeSubscription};

/// Names and addresses the host uses to reach the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostOptions {
    pub scheme: String,
    pub host: String,
    pub entry: String,
    pub bootstrap_function: String,
    pub watched_property: String,
    pub changed_event: String,
    pub changed_argument: String,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self::from_config(&PageHostConfig::default())
    }
}

impl HostOptions {
    pub fn from_config(config: &PageHostConfig) -> Self {
        Self {
            scheme: config.page.scheme.clone(),
            host: config.page.host.clone(),
            entry: config.page.entry.clone(),
            bootstrap_function: config.bridge.bootstrap_function.clone(),
            watched_property: config.theme.watched_property.clone(),
            changed_event: config.theme.changed_event.clone(),
            changed_argument: config.theme.changed_argument.clone(),
        }
    }

    pub fn bootstrap_url(&self) -> String {
        pagehost_config::bootstrap_url(&self.scheme, &self.host, &self.entry)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Constructed,
    Disposed,
}

/// What one [`EmbeddedPageHost::pump`] call processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    /// Theme notifications forwarded to the page.
    pub theme_forwards: usize,
    /// IPC envelopes received from the page.
    pub ipc_messages: usize,
    /// Page loads that finished.
    pub page_loads: usize,
}

impl PumpStats {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Hosts the bundled page in a browser surface and keeps it connected to
/// the host application.
///
/// Construction registers the custom scheme, paints the surface with the
/// host panel background, wires both bridges, subscribes to theme changes
/// and finally loads the entry page. All later work happens in
/// [`pump`](Self::pump), which the owner calls from its event loop.
///
/// The host is single-threaded; it must be created, pumped and dropped on
/// the UI thread that owns the surface.
pub struct EmbeddedPageHost {
    surface: Rc<dyn BrowserSurface>,
    options: HostOptions,
    outbound: HostToPageBridge,
    inbound: Rc<PageToHostBridge>,
    disposer: Disposer,
    subscription: RefCell<Option<ThemeSubscription>>,
    registration: RefCell<Option<SchemeRegistration>>,
    state: Cell<HostState>,
}

impl EmbeddedPageHost {
    pub fn new(
        surface: Rc<dyn BrowserSurface>,
        registry: &SchemeRegistry,
        handler: Arc<dyn SchemeHandler>,
        theme: &dyn ThemeSource,
        request_handler: RequestRouter,
        options: HostOptions,
    ) -> Result<Self> {
        let registration = registry.register(&options.scheme, &options.host, handler)?;

        let snapshot = theme.current();
        surface.set_background_color(snapshot.panel_background)?;

        let outbound = HostToPageBridge::new(Rc::clone(&surface));
        let inbound = Rc::new(PageToHostBridge::new(Rc::clone(&surface), request_handler));
        inbound.set_init_script(js_bootstrap_call(
            &options.bootstrap_function,
            snapshot.is_dark(),
        ));

        let disposer = Disposer::new();
        disposer.register(Rc::clone(&inbound) as Rc<dyn Disposable>);

        let subscription = theme.subscribe();

        let url = options.bootstrap_url();
        surface.load_url(&url)?;
        info!(url = %url, dark = snapshot.is_dark(), "embedded page host created");

        Ok(Self {
            surface,
            options,
            outbound,
            inbound,
            disposer,
            subscription: RefCell::new(Some(subscription)),
            registration: RefCell::new(Some(registration)),
            state: Cell::new(HostState::Constructed),
        })
    }

    /// Process pending theme notifications and surface events.
    ///
    /// Never blocks. Failures are logged and do not stop processing.
    pub fn pump(&self) -> PumpStats {
        let mut stats = PumpStats::default();
        if self.state.get() == HostState::Disposed {
            return stats;
        }
        stats.theme_forwards = self.forward_theme_changes();

        for event in self.surface.drain_events() {
            match event {
                WebViewEvent::PageLoad { state, url } => {
                    trace!(?state, url = %url, "page load");
                    if self.inbound.handle_page_load(state, &url) {
                        stats.page_loads += 1;
                    }
                }
                WebViewEvent::IpcMessage { body } => {
                    stats.ipc_messages += 1;
                    self.inbound.handle_message(&body);
                }
                WebViewEvent::TitleChanged { title } => {
                    debug!(title = %title, "page title changed");
                }
                WebViewEvent::NavigationRequested { url } => {
                    trace!(url = %url, "navigation");
                }
                WebViewEvent::NavigationBlocked { url } => {
                    warn!(url = %url, "page attempted to leave the bundled origin");
                }
            }
        }
        stats
    }

    fn forward_theme_changes(&self) -> usize {
        let mut subscription = self.subscription.borrow_mut();
        let Some(subscription) = subscription.as_mut() else {
            return 0;
        };
        let argument = Value::String(self.options.changed_argument.clone());
        let mut forwarded = 0;
        while let Some(event) = subscription.try_next() {
            match event {
                ThemeEvent::Changed(change) if change.property != self.options.watched_property => {
                    trace!(property = %change.property, "ignoring theme property change");
                    continue;
                }
                ThemeEvent::Changed(_) => {}
                // One call per lagged window.
                ThemeEvent::Lagged { skipped } => {
                    debug!(skipped, "forwarding theme change for lagged window");
                }
            }
            match self
                .outbound
                .call_js(&self.options.changed_event, std::slice::from_ref(&argument))
            {
                Ok(()) => forwarded += 1,
                Err(e) => warn!(error = %e, "failed to forward theme change"),
            }
        }
        forwarded
    }

    pub fn inbound_bridge(&self) -> &PageToHostBridge {
        &self.inbound
    }

    pub fn outbound_bridge(&self) -> &HostToPageBridge {
        &self.outbound
    }

    /// Give keyboard focus to the page.
    pub fn focus(&self) {
        if self.state.get() == HostState::Disposed {
            debug!("focus requested on disposed host");
            return;
        }
        if let Err(e) = self.surface.focus() {
            warn!(error = %e, "failed to focus embedded page");
        }
    }

    pub fn state(&self) -> HostState {
        self.state.get()
    }

    pub fn options(&self) -> &HostOptions {
        &self.options
    }

    /// Tear down bridges, the theme subscription and the scheme
    /// registration. Safe to call more than once.
    pub fn dispose(&self) {
        if self.state.replace(HostState::Disposed) == HostState::Disposed {
            return;
        }
        self.disposer.dispose_all();
        if let Some(subscription) = self.subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
        if let Some(registration) = self.registration.borrow_mut().take() {
            registration.release();
        }
        self.outbound.dispose();
        info!("embedded page host disposed");
    }
}

impl Drop for EmbeddedPageHost {
    fn drop(&mut self) {
        self.dispose();
    }
}
