//! Embedded page host built on a native webview.
//!
//! Provides:
//! - A refcounted registry of custom URL scheme handlers
//! - Bundled content serving for the custom scheme
//! - Bidirectional messaging (host -> page calls, page -> host requests)
//! - A theme source abstraction that forwards look-and-feel changes
//! - `EmbeddedPageHost`, which wires all of the above to one browser surface

pub mod bridge;
pub mod content;
pub mod events;
pub mod host;
pub mod ipc;
pub mod scheme;
pub mod surface;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;

pub use bridge::{
    Disposable, Disposer, HostToPageBridge, PageToHostBridge, RequestHandler, RequestRouter,
};
pub use content::ContentProvider;
pub use events::{PageLoadState, WebViewEvent};
pub use host::{EmbeddedPageHost, HostOptions, HostState, PumpStats};
pub use ipc::{IpcMessage, IpcPayload};
pub use scheme::{Asset, SchemeHandler, SchemeRegistration, SchemeRegistry, SchemeResponse};
pub use surface::{BrowserSurface, NavigationPolicy, WrySurface, WrySurfaceOptions};
pub use theme::{
    ThemeBus, ThemeChange, ThemeEvent, ThemePalette, ThemeSnapshot, ThemeSource,
    ThemeSubscription,
};
