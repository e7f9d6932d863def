//! Host theme source.
//!
//! The host's appearance is exposed through [`ThemeSource`]: a snapshot of
//! the current state plus a subscription to discrete change notifications.
//! [`ThemeBus`] is the in-process implementation, fed by whatever watches the
//! OS or toolkit theme.

use std::sync::{Mutex, PoisonError};

use pagehost_common::{Appearance, Color};
use pagehost_config::ThemeConfig;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::{debug, warn};

/// Property name published when the active look-and-feel changes.
pub const LOOK_AND_FEEL: &str = "lookAndFeel";

const DEFAULT_CAPACITY: usize = 16;

/// The host appearance at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub appearance: Appearance,
    /// Background of host panels; used to paint the surface before the page
    /// stylesheet loads.
    pub panel_background: Color,
}

impl ThemeSnapshot {
    pub fn is_dark(&self) -> bool {
        self.appearance.is_dark()
    }
}

/// Panel backgrounds per appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub dark: Color,
    pub light: Color,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            dark: Color::from_rgb(0x2b, 0x2d, 0x30),
            light: Color::from_rgb(0xf7, 0xf8, 0xfa),
        }
    }
}

impl ThemePalette {
    /// Build from config; unparseable colors fall back to the defaults.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = Self::default();
        Self {
            dark: Color::from_hex(&config.dark_background).unwrap_or(defaults.dark),
            light: Color::from_hex(&config.light_background).unwrap_or(defaults.light),
        }
    }

    pub fn snapshot(&self, appearance: Appearance) -> ThemeSnapshot {
        let panel_background = match appearance {
            Appearance::Dark => self.dark,
            Appearance::Light => self.light,
        };
        ThemeSnapshot {
            appearance,
            panel_background,
        }
    }
}

/// A property-change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeChange {
    pub property: String,
}

impl ThemeChange {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }

    pub fn is_look_and_feel(&self) -> bool {
        self.property == LOOK_AND_FEEL
    }
}

/// What a subscription yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeEvent {
    Changed(ThemeChange),
    /// The subscriber fell behind and `skipped` notifications were lost.
    /// Any of them may have been a look-and-feel change.
    Lagged { skipped: u64 },
}

/// Capability to read the host theme and follow its changes.
pub trait ThemeSource {
    fn current(&self) -> ThemeSnapshot;
    fn subscribe(&self) -> ThemeSubscription;
}

/// Receiving end of a theme subscription.
///
/// Dropping the subscription (or calling [`unsubscribe`](Self::unsubscribe))
/// detaches it from the source.
pub struct ThemeSubscription {
    receiver: Option<broadcast::Receiver<ThemeChange>>,
}

impl ThemeSubscription {
    pub fn new(receiver: broadcast::Receiver<ThemeChange>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    /// Next pending event without blocking. Returns `None` when the queue
    /// is empty or the source is gone.
    pub fn try_next(&mut self) -> Option<ThemeEvent> {
        let receiver = self.receiver.as_mut()?;
        match receiver.try_recv() {
            Ok(change) => Some(ThemeEvent::Changed(change)),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "theme subscription lagged, notifications dropped");
                Some(ThemeEvent::Lagged { skipped })
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                debug!("theme source closed");
                self.receiver = None;
                None
            }
        }
    }

    /// Wait for the next event. Returns `None` once the source is gone.
    pub async fn recv(&mut self) -> Option<ThemeEvent> {
        let receiver = self.receiver.as_mut()?;
        match receiver.recv().await {
            Ok(change) => Some(ThemeEvent::Changed(change)),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "theme subscription lagged, notifications dropped");
                Some(ThemeEvent::Lagged { skipped })
            }
            Err(RecvError::Closed) => {
                self.receiver = None;
                None
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn unsubscribe(mut self) {
        self.receiver = None;
    }
}

/// Broadcast-backed [`ThemeSource`].
pub struct ThemeBus {
    sender: broadcast::Sender<ThemeChange>,
    snapshot: Mutex<ThemeSnapshot>,
}

impl ThemeBus {
    pub fn new(initial: ThemeSnapshot) -> Self {
        Self::with_capacity(initial, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(initial: ThemeSnapshot, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            snapshot: Mutex::new(initial),
        }
    }

    /// Store a new snapshot and publish a look-and-feel change.
    /// Returns the number of subscribers notified.
    pub fn set_snapshot(&self, snapshot: ThemeSnapshot) -> usize {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = snapshot;
        debug!(appearance = %snapshot.appearance, "host theme changed");
        self.notify(LOOK_AND_FEEL)
    }

    /// Publish a change of an arbitrary property.
    pub fn notify(&self, property: impl Into<String>) -> usize {
        self.sender.send(ThemeChange::new(property)).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl ThemeSource for ThemeBus {
    fn current(&self) -> ThemeSnapshot {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn subscribe(&self) -> ThemeSubscription {
        ThemeSubscription::new(self.sender.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark() -> ThemeSnapshot {
        ThemePalette::default().snapshot(Appearance::Dark)
    }

    fn light() -> ThemeSnapshot {
        ThemePalette::default().snapshot(Appearance::Light)
    }

    #[test]
    fn palette_maps_appearance_to_background() {
        let palette = ThemePalette::default();
        assert_eq!(palette.snapshot(Appearance::Dark).panel_background.to_hex(), "#2b2d30");
        assert_eq!(palette.snapshot(Appearance::Light).panel_background.to_hex(), "#f7f8fa");
    }

    #[test]
    fn palette_from_config_falls_back_on_bad_colors() {
        let config = ThemeConfig {
            dark_background: "#000000".into(),
            light_background: "white".into(),
            ..Default::default()
        };
        let palette = ThemePalette::from_config(&config);
        assert_eq!(palette.dark, Color::from_rgb(0, 0, 0));
        assert_eq!(palette.light, ThemePalette::default().light);
    }

    #[test]
    fn current_reflects_latest_snapshot() {
        let bus = ThemeBus::new(light());
        assert!(!bus.current().is_dark());
        bus.set_snapshot(dark());
        assert!(bus.current().is_dark());
    }

    #[test]
    fn set_snapshot_publishes_look_and_feel() {
        let bus = ThemeBus::new(light());
        let mut sub = bus.subscribe();
        assert_eq!(bus.set_snapshot(dark()), 1);

        let Some(ThemeEvent::Changed(change)) = sub.try_next() else {
            panic!("expected a change");
        };
        assert!(change.is_look_and_feel());
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn notify_publishes_other_properties() {
        let bus = ThemeBus::new(light());
        let mut sub = bus.subscribe();
        bus.notify("defaultFont");
        assert_eq!(
            sub.try_next(),
            Some(ThemeEvent::Changed(ThemeChange::new("defaultFont")))
        );
    }

    #[test]
    fn publish_without_subscribers_returns_zero() {
        let bus = ThemeBus::new(light());
        assert_eq!(bus.notify(LOOK_AND_FEEL), 0);
    }

    #[test]
    fn unsubscribe_detaches_receiver() {
        let bus = ThemeBus::new(light());
        let sub = bus.subscribe();
        let other = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        sub.unsubscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(other);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn lagged_subscription_reports_the_loss() {
        let bus = ThemeBus::with_capacity(light(), 2);
        let mut sub = bus.subscribe();
        bus.set_snapshot(dark());
        for i in 0..4 {
            bus.notify(format!("p{i}"));
        }
        assert_eq!(sub.try_next(), Some(ThemeEvent::Lagged { skipped: 3 }));
        assert_eq!(sub.try_next(), Some(ThemeEvent::Changed(ThemeChange::new("p2"))));
        assert_eq!(sub.try_next(), Some(ThemeEvent::Changed(ThemeChange::new("p3"))));
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn closed_source_deactivates_subscription() {
        let bus = ThemeBus::new(light());
        let mut sub = bus.subscribe();
        drop(bus);
        assert!(sub.try_next().is_none());
        assert!(!sub.is_active());
    }

    #[tokio::test]
    async fn recv_waits_for_notification() {
        let bus = std::sync::Arc::new(ThemeBus::new(light()));
        let mut sub = bus.subscribe();

        let publisher = std::sync::Arc::clone(&bus);
        tokio::spawn(async move {
            publisher.set_snapshot(dark());
        });

        let Some(ThemeEvent::Changed(change)) = sub.recv().await else {
            panic!("expected a change");
        };
        assert!(change.is_look_and_feel());
    }
}
