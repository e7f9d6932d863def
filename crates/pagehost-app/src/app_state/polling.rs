//! Periodic host pumping.

use std::time::{Duration, Instant};

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::PageHostApp;

/// How often queued page and theme events are processed.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

impl PageHostApp {
    /// Pump the host and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            if let Some(host) = &self.host {
                let stats = host.pump();
                if !stats.is_idle() {
                    tracing::trace!(
                        theme_forwards = stats.theme_forwards,
                        ipc_messages = stats.ipc_messages,
                        page_loads = stats.page_loads,
                        "host pumped"
                    );
                }
            }
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }
}
