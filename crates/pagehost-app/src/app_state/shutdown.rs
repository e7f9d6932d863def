//! Orderly teardown.

use super::core::PageHostApp;

impl PageHostApp {
    /// Dispose the host, then drop the surface and the window.
    pub(super) fn shutdown(&mut self) {
        tracing::info!("initiating shutdown");

        if let Some(host) = self.host.take() {
            host.dispose();
        }
        self.surface = None;
        self.theme = None;
        self.window = None;
        self.should_exit = true;

        tracing::info!("shutdown complete");
    }
}
