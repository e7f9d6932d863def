//! `PageHostApp` struct and constructor.

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use pagehost_config::PageHostConfig;
use pagehost_webview::{EmbeddedPageHost, SchemeRegistry, ThemeBus, ThemePalette, WrySurface};
use winit::window::Window;

/// Application state driven by the winit event loop.
///
/// Fields drop in declaration order: the host releases its bridges before
/// the surface goes away, and the surface before its parent window.
pub struct PageHostApp {
    pub(super) host: Option<EmbeddedPageHost>,
    pub(super) surface: Option<Rc<WrySurface>>,
    pub(super) theme: Option<Rc<ThemeBus>>,
    pub(super) window: Option<Arc<Window>>,

    pub(super) config: PageHostConfig,
    pub(super) assets_dir: PathBuf,
    pub(super) palette: ThemePalette,
    pub(super) registry: SchemeRegistry,

    pub(super) last_poll: Instant,
    pub(super) should_exit: bool,
}

impl PageHostApp {
    pub fn new(config: PageHostConfig, assets_dir: PathBuf) -> Self {
        let palette = ThemePalette::from_config(&config.theme);
        Self {
            host: None,
            surface: None,
            theme: None,
            window: None,
            config,
            assets_dir,
            palette,
            registry: SchemeRegistry::new(),
            last_poll: Instant::now(),
            should_exit: false,
        }
    }
}
