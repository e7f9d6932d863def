//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Theme, WindowId};

use super::bounds::{appearance_of, full_window_bounds};
use super::core::PageHostApp;

impl ApplicationHandler for PageHostApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if !self.initialize_window(event_loop) {
            self.should_exit = true;
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.sync_surface_bounds(size);
                }
            }

            WindowEvent::ThemeChanged(theme) => {
                self.handle_theme_changed(theme);
            }

            WindowEvent::Focused(true) => {
                if let Some(host) = &self.host {
                    host.focus();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl PageHostApp {
    fn sync_surface_bounds(&self, size: winit::dpi::PhysicalSize<u32>) {
        let (Some(window), Some(surface)) = (&self.window, &self.surface) else {
            return;
        };
        let bounds = full_window_bounds(size, window.scale_factor());
        if let Err(e) = surface.set_bounds(bounds) {
            tracing::warn!("failed to resize page surface: {e}");
        }
    }

    /// Publish the new OS theme; the host forwards it on the next poll.
    fn handle_theme_changed(&self, theme: Theme) {
        let Some(bus) = &self.theme else {
            return;
        };
        let snapshot = self.palette.snapshot(appearance_of(Some(theme)));
        let notified = bus.set_snapshot(snapshot);
        tracing::debug!(?theme, notified, "OS theme changed");
    }
}
