use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pagehost_common::{BridgeError, RequestError};
use serde_json::Value;
use tracing::{debug, warn};

use crate::events::PageLoadState;
use crate::ipc::{js_reject_request, js_resolve_request, IpcMessage, IpcPayload};
use crate::surface::BrowserSurface;

use super::{Disposable, RequestHandler, RequestRouter};

/// Receives requests from the embedded page and runs the bootstrap script.
///
/// The bootstrap script is evaluated each time a document finishes loading,
/// so a reload re-initializes the page with the current arguments.
pub struct PageToHostBridge {
    surface: Rc<dyn BrowserSurface>,
    router: RefCell<RequestRouter>,
    init_script: RefCell<Option<String>>,
    init_runs: Cell<u32>,
    disposed: Cell<bool>,
    dispose_count: Cell<u32>,
}

impl PageToHostBridge {
    pub fn new(surface: Rc<dyn BrowserSurface>, router: RequestRouter) -> Self {
        Self {
            surface,
            router: RefCell::new(router),
            init_script: RefCell::new(None),
            init_runs: Cell::new(0),
            disposed: Cell::new(false),
            dispose_count: Cell::new(0),
        }
    }

    /// Queue `script` to run when the page is ready. Replaces any earlier one.
    pub fn set_init_script(&self, script: impl Into<String>) {
        *self.init_script.borrow_mut() = Some(script.into());
    }

    pub fn init_script(&self) -> Option<String> {
        self.init_script.borrow().clone()
    }

    /// Number of times the bootstrap script has been evaluated.
    pub fn init_runs(&self) -> u32 {
        self.init_runs.get()
    }

    /// React to a page load transition. Returns `true` if the bootstrap
    /// script was evaluated.
    pub fn handle_page_load(&self, state: PageLoadState, url: &str) -> bool {
        if self.disposed.get() || state != PageLoadState::Finished {
            return false;
        }
        let Some(script) = self.init_script() else {
            return false;
        };
        match self.surface.evaluate_script(&script) {
            Ok(()) => {
                self.init_runs.set(self.init_runs.get() + 1);
                debug!(url, "bootstrap script evaluated");
                true
            }
            Err(e) => {
                warn!(url, error = %e, "failed to run bootstrap script");
                false
            }
        }
    }

    /// Handle a raw `postMessage` body. Returns `true` if it was a valid
    /// envelope and reached a handler.
    pub fn handle_message(&self, raw: &str) -> bool {
        if self.disposed.get() {
            debug!("dropping page message after dispose");
            return false;
        }
        let Some(message) = IpcMessage::from_json(raw) else {
            warn!(body_len = raw.len(), "ignoring malformed page message");
            return false;
        };

        let result = match self.router.try_borrow() {
            Ok(router) => router.handle(&message),
            Err(_) => Err(RequestError::Failed("request router is busy".into())),
        };

        match (&result, message.id) {
            (Ok(_), None) => {}
            (Err(e), None) => warn!(kind = %message.kind, error = %e, "page message failed"),
            (Ok(value), Some(id)) => self.reply(&js_resolve_request(id, value)),
            (Err(e), Some(id)) => {
                debug!(kind = %message.kind, id, error = %e, "rejecting page request");
                self.reply(&js_reject_request(id, &e.to_string()));
            }
        }
        true
    }

    fn reply(&self, script: &str) {
        if let Err(e) = self.surface.evaluate_script(script) {
            warn!(error = %e, "failed to deliver reply to page");
        }
    }

    /// Add or replace a route on the live router.
    pub fn register_handler<F>(&self, kind: &str, route: F) -> Result<bool, BridgeError>
    where
        F: Fn(&IpcPayload) -> Result<Value, RequestError> + 'static,
    {
        if self.disposed.get() {
            return Err(BridgeError::Disposed);
        }
        let mut router = self
            .router
            .try_borrow_mut()
            .map_err(|_| BridgeError::Busy)?;
        Ok(router.register(kind, route))
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Number of times the release hook actually ran. Never exceeds one.
    pub fn dispose_count(&self) -> u32 {
        self.dispose_count.get()
    }
}

impl Disposable for PageToHostBridge {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.dispose_count.set(self.dispose_count.get() + 1);
        if let Ok(mut router) = self.router.try_borrow_mut() {
            router.clear();
        }
        self.init_script.borrow_mut().take();
        debug!("page-to-host bridge disposed");
    }
}
