//! Browser surface abstraction.
//!
//! The host drives an embedded browser through [`BrowserSurface`] rather
//! than a concrete toolkit type. [`WrySurface`] is the `wry` implementation.

mod handlers;
mod webview;

pub use handlers::NavigationPolicy;
pub use webview::{WrySurface, WrySurfaceOptions};

use pagehost_common::{Color, SurfaceError};

use crate::events::WebViewEvent;

/// Operations the host needs from an embedded browser.
///
/// Implementations queue their events (page loads, IPC messages, ...) and
/// hand them out through [`drain_events`](Self::drain_events); callbacks
/// never call back into the host directly.
pub trait BrowserSurface {
    /// Navigate to `url`.
    fn load_url(&self, url: &str) -> Result<(), SurfaceError>;

    /// Run script in the current document.
    fn evaluate_script(&self, js: &str) -> Result<(), SurfaceError>;

    /// Fill color shown before the page paints.
    fn set_background_color(&self, color: Color) -> Result<(), SurfaceError>;

    /// Move keyboard focus into the native browser view.
    fn focus(&self) -> Result<(), SurfaceError>;

    /// Take all queued events.
    fn drain_events(&self) -> Vec<WebViewEvent>;
}
