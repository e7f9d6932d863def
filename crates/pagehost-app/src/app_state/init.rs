//! Window, browser surface and page host creation.

use std::rc::Rc;
use std::sync::Arc;

use pagehost_common::HostError;
use pagehost_webview::{
    BrowserSurface, ContentProvider, EmbeddedPageHost, HostOptions, ThemeBus, ThemeSource,
    WrySurface, WrySurfaceOptions,
};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use super::bounds::{appearance_of, full_window_bounds};
use super::core::PageHostApp;
use super::requests::build_router;

// =============================================================================
// INITIALIZATION
// =============================================================================

impl PageHostApp {
    /// Create the window and the embedded page host.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title("pagehost")
            .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 768.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                return false;
            }
        };
        self.window = Some(window);

        if let Err(e) = self.initialize_host() {
            tracing::error!("failed to create embedded page host: {e}");
            return false;
        }
        tracing::info!("window and page host initialized");
        true
    }

    fn initialize_host(&mut self) -> Result<(), HostError> {
        let Some(window) = self.window.clone() else {
            return Err(HostError::Other("window not created".into()));
        };

        let appearance = appearance_of(window.theme());
        let theme = Rc::new(ThemeBus::new(self.palette.snapshot(appearance)));

        let assets_dir = std::env::current_dir()
            .unwrap_or_default()
            .join(&self.assets_dir);
        if !assets_dir.is_dir() {
            tracing::warn!(
                path = %assets_dir.display(),
                "assets directory not found, the page will fail to load"
            );
        }
        let content = Arc::new(ContentProvider::new(&assets_dir));

        let bounds = full_window_bounds(window.inner_size(), window.scale_factor());
        let options = WrySurfaceOptions::from_config(&self.config, theme.current().panel_background);
        let surface = Rc::new(WrySurface::build_as_child(
            window.as_ref(),
            bounds,
            options,
            self.registry.clone(),
        )?);

        let host = EmbeddedPageHost::new(
            Rc::clone(&surface) as Rc<dyn BrowserSurface>,
            &self.registry,
            content,
            theme.as_ref(),
            build_router(&self.config, Rc::clone(&theme)),
            HostOptions::from_config(&self.config),
        )?;

        tracing::info!(
            assets_dir = %assets_dir.display(),
            dark = appearance.is_dark(),
            "embedded page host ready"
        );
        self.theme = Some(theme);
        self.surface = Some(surface);
        self.host = Some(host);
        Ok(())
    }
}
