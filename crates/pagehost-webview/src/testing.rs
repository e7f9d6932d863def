//! Recording [`BrowserSurface`] for unit tests.

use std::cell::{Cell, RefCell};

use pagehost_common::{Color, SurfaceError};

use crate::events::{PageLoadState, WebViewEvent};
use crate::surface::BrowserSurface;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceCall {
    LoadUrl(String),
    Evaluate(String),
    Background(Color),
    Focus,
}

type LoadCheck = Box<dyn Fn(&str) -> bool>;

#[derive(Default)]
pub(crate) struct MockSurface {
    calls: RefCell<Vec<SurfaceCall>>,
    queued: RefCell<Vec<WebViewEvent>>,
    pub(crate) fail_scripts: Cell<bool>,
    pub(crate) fail_load: Cell<bool>,
    load_check: RefCell<Option<LoadCheck>>,
    load_check_results: RefCell<Vec<bool>>,
}

impl MockSurface {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn scripts(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Evaluate(js) => Some(js.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(*c)).count()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn queue(&self, event: WebViewEvent) {
        self.queued.borrow_mut().push(event);
    }

    pub(crate) fn queue_page_ready(&self, url: &str) {
        self.queue(WebViewEvent::PageLoad {
            state: PageLoadState::Finished,
            url: url.to_string(),
        });
    }

    pub(crate) fn queue_ipc(&self, body: &str) {
        self.queue(WebViewEvent::IpcMessage {
            body: body.to_string(),
        });
    }

    /// Evaluate `check` with the URL at every `load_url` call.
    pub(crate) fn set_load_check(&self, check: impl Fn(&str) -> bool + 'static) {
        *self.load_check.borrow_mut() = Some(Box::new(check));
    }

    pub(crate) fn load_check_results(&self) -> Vec<bool> {
        self.load_check_results.borrow().clone()
    }
}

impl BrowserSurface for MockSurface {
    fn load_url(&self, url: &str) -> Result<(), SurfaceError> {
        if let Some(check) = self.load_check.borrow().as_ref() {
            self.load_check_results.borrow_mut().push(check(url));
        }
        self.calls
            .borrow_mut()
            .push(SurfaceCall::LoadUrl(url.to_string()));
        if self.fail_load.get() {
            return Err(SurfaceError::Engine("load failed".into()));
        }
        Ok(())
    }

    fn evaluate_script(&self, js: &str) -> Result<(), SurfaceError> {
        self.calls
            .borrow_mut()
            .push(SurfaceCall::Evaluate(js.to_string()));
        if self.fail_scripts.get() {
            return Err(SurfaceError::Closed);
        }
        Ok(())
    }

    fn set_background_color(&self, color: Color) -> Result<(), SurfaceError> {
        self.calls.borrow_mut().push(SurfaceCall::Background(color));
        Ok(())
    }

    fn focus(&self) -> Result<(), SurfaceError> {
        self.calls.borrow_mut().push(SurfaceCall::Focus);
        Ok(())
    }

    fn drain_events(&self) -> Vec<WebViewEvent> {
        std::mem::take(&mut *self.queued.borrow_mut())
    }
}
