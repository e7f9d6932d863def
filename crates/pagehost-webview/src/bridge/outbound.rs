use std::cell::Cell;
use std::rc::Rc;

use pagehost_common::BridgeError;
use serde_json::Value;
use tracing::{debug, trace};

use crate::ipc::{js_call_function, js_dispatch_message};
use crate::surface::BrowserSurface;

use super::Disposable;

/// Calls named functions in the embedded page.
pub struct HostToPageBridge {
    surface: Rc<dyn BrowserSurface>,
    disposed: Cell<bool>,
}

impl HostToPageBridge {
    pub fn new(surface: Rc<dyn BrowserSurface>) -> Self {
        Self {
            surface,
            disposed: Cell::new(false),
        }
    }

    /// Invoke the page function at `function` (dotted paths allowed) with
    /// `args`. A function the page has not defined is silently skipped by the
    /// generated script.
    pub fn call_js(&self, function: &str, args: &[Value]) -> Result<(), BridgeError> {
        if self.disposed.get() {
            return Err(BridgeError::Disposed);
        }
        trace!(function, argc = args.len(), "calling page function");
        self.surface.evaluate_script(&js_call_function(function, args))?;
        Ok(())
    }

    /// Deliver a message to a callback registered with `pagehost.ipc.on`.
    pub fn send(&self, kind: &str, payload: &Value) -> Result<(), BridgeError> {
        if self.disposed.get() {
            return Err(BridgeError::Disposed);
        }
        self.surface
            .evaluate_script(&js_dispatch_message(kind, payload))?;
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl Disposable for HostToPageBridge {
    fn dispose(&self) {
        if !self.disposed.replace(true) {
            debug!("host-to-page bridge disposed");
        }
    }
}
