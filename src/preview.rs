//! Sitemap preview poller.
//!
//! Backs the landing page's live sitemap panel: a countdown re-fetches the
//! rendered sitemap on a fixed interval so visitors can watch seeded data
//! propagate through the revalidation window. The countdown itself is a
//! pure state machine (one tick per second); a background task drives it
//! and keeps a shared snapshot for the page and the JSON endpoint.
//!
//! Rules:
//! - Ticks are frozen while a refresh is in flight.
//! - Reaching zero triggers a refresh and restarts the counter.
//! - A successful seed restarts the counter without forcing a refresh, so
//!   the panel still demonstrates the revalidation delay.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Notify, RwLock};
use tracing::debug;

use crate::sitemap::SitemapService;

/// Bounds for the configured preview refresh interval, in seconds.
pub const MIN_PREVIEW_INTERVAL_SECONDS: u32 = 5;
pub const MAX_PREVIEW_INTERVAL_SECONDS: u32 = 300;

/// Outcome of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Keep waiting; `remaining` seconds until the next refresh.
    Continue { remaining: u32 },

    /// The interval expired: refresh now. The counter has already been
    /// reset to the full interval.
    Refresh,
}

/// Per-second countdown driving the preview refresh cycle.
#[derive(Debug)]
pub struct Countdown {
    interval: u32,
    remaining: u32,
}

impl Countdown {
    /// Create a countdown, clamping the interval into the allowed bounds.
    pub fn new(interval_seconds: u32) -> Self {
        let interval =
            interval_seconds.clamp(MIN_PREVIEW_INTERVAL_SECONDS, MAX_PREVIEW_INTERVAL_SECONDS);

        Self {
            interval,
            remaining: interval,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance by one second.
    ///
    /// While a refresh is in flight the counter is frozen, so slow fetches
    /// cannot queue up further refreshes behind themselves.
    pub fn tick(&mut self, in_flight: bool) -> Tick {
        if in_flight {
            return Tick::Continue {
                remaining: self.remaining,
            };
        }

        if self.remaining <= 1 {
            self.remaining = self.interval;
            return Tick::Refresh;
        }

        self.remaining -= 1;
        Tick::Continue {
            remaining: self.remaining,
        }
    }

    /// Reset the counter to the full interval.
    pub fn restart(&mut self) {
        self.remaining = self.interval;
    }
}

/// Shared preview state served to the landing page and the JSON endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSnapshot {
    /// Seconds until the next automatic refresh.
    pub seconds_remaining: u32,

    /// Whether a refresh is currently in flight.
    pub refreshing: bool,

    /// Latest rendered sitemap XML; `None` until the first fetch lands.
    pub sitemap_xml: Option<String>,
}

/// Handle to the background preview poller.
pub struct SitemapPreview {
    state: RwLock<PreviewSnapshot>,
    restart: Notify,
}

impl SitemapPreview {
    fn new(interval_seconds: u32) -> Self {
        let countdown = Countdown::new(interval_seconds);

        Self {
            state: RwLock::new(PreviewSnapshot {
                seconds_remaining: countdown.remaining(),
                refreshing: false,
                sitemap_xml: None,
            }),
            restart: Notify::new(),
        }
    }

    /// Current snapshot for rendering.
    pub async fn snapshot(&self) -> PreviewSnapshot {
        self.state.read().await.clone()
    }

    /// Restart the countdown (called after a successful seed).
    pub fn restart_countdown(&self) {
        self.restart.notify_one();
    }

    async fn set_remaining(&self, remaining: u32) {
        self.state.write().await.seconds_remaining = remaining;
    }
}

/// Spawn the poller task and return its shared handle.
pub fn spawn(sitemap: Arc<SitemapService>, interval_seconds: u32) -> Arc<SitemapPreview> {
    let preview = Arc::new(SitemapPreview::new(interval_seconds));

    tokio::spawn(run(Arc::clone(&preview), sitemap, interval_seconds));

    preview
}

async fn run(preview: Arc<SitemapPreview>, sitemap: Arc<SitemapService>, interval_seconds: u32) {
    let mut countdown = Countdown::new(interval_seconds);

    // Initial fetch so the panel has content before the first expiry.
    spawn_refresh(Arc::clone(&preview), Arc::clone(&sitemap));

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let in_flight = preview.state.read().await.refreshing;

                match countdown.tick(in_flight) {
                    Tick::Continue { remaining } => {
                        preview.set_remaining(remaining).await;
                    }
                    Tick::Refresh => {
                        debug!("Preview countdown expired, refreshing sitemap");
                        preview.set_remaining(countdown.remaining()).await;
                        spawn_refresh(Arc::clone(&preview), Arc::clone(&sitemap));
                    }
                }
            }
            _ = preview.restart.notified() => {
                debug!("Preview countdown restarted");
                countdown.restart();
                preview.set_remaining(countdown.remaining()).await;
            }
        }
    }
}

fn spawn_refresh(preview: Arc<SitemapPreview>, sitemap: Arc<SitemapService>) {
    tokio::spawn(async move {
        {
            let mut state = preview.state.write().await;
            if state.refreshing {
                return;
            }
            state.refreshing = true;
        }

        let xml = sitemap.sitemap_xml().await;

        let mut state = preview.state.write().await;
        state.sitemap_xml = Some(xml);
        state.refreshing = false;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_decrements_per_tick() {
        let mut countdown = Countdown::new(10);

        assert_eq!(countdown.tick(false), Tick::Continue { remaining: 9 });
        assert_eq!(countdown.tick(false), Tick::Continue { remaining: 8 });
    }

    #[test]
    fn test_countdown_refreshes_at_zero_and_resets() {
        let mut countdown = Countdown::new(5);

        for remaining in (1..5).rev() {
            assert_eq!(countdown.tick(false), Tick::Continue { remaining });
        }

        assert_eq!(countdown.tick(false), Tick::Refresh);
        assert_eq!(countdown.remaining(), 5);
    }

    #[test]
    fn test_countdown_frozen_while_in_flight() {
        let mut countdown = Countdown::new(10);
        countdown.tick(false);

        // In-flight ticks keep the remaining time unchanged.
        assert_eq!(countdown.tick(true), Tick::Continue { remaining: 9 });
        assert_eq!(countdown.tick(true), Tick::Continue { remaining: 9 });
        assert_eq!(countdown.tick(false), Tick::Continue { remaining: 8 });
    }

    #[test]
    fn test_countdown_frozen_at_expiry_while_in_flight() {
        let mut countdown = Countdown::new(5);
        for _ in 0..4 {
            countdown.tick(false);
        }
        assert_eq!(countdown.remaining(), 1);

        // Even at 1 second left, an in-flight refresh blocks expiry.
        assert_eq!(countdown.tick(true), Tick::Continue { remaining: 1 });
        assert_eq!(countdown.tick(false), Tick::Refresh);
    }

    #[test]
    fn test_countdown_restart() {
        let mut countdown = Countdown::new(10);
        countdown.tick(false);
        countdown.tick(false);

        countdown.restart();
        assert_eq!(countdown.remaining(), 10);
    }

    #[test]
    fn test_countdown_clamps_interval() {
        assert_eq!(Countdown::new(0).remaining(), MIN_PREVIEW_INTERVAL_SECONDS);
        assert_eq!(
            Countdown::new(100_000).remaining(),
            MAX_PREVIEW_INTERVAL_SECONDS
        );
        assert_eq!(Countdown::new(60).remaining(), 60);
    }

    #[tokio::test]
    async fn test_snapshot_initial_state() {
        let preview = SitemapPreview::new(60);
        let snapshot = preview.snapshot().await;

        assert_eq!(snapshot.seconds_remaining, 60);
        assert!(!snapshot.refreshing);
        assert!(snapshot.sitemap_xml.is_none());
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let snapshot = PreviewSnapshot {
            seconds_remaining: 42,
            refreshing: false,
            sitemap_xml: None,
        };

        let json = serde_json::to_value(&snapshot).expect("serialize");
        assert_eq!(json["secondsRemaining"], 42);
        assert!(json.get("sitemapXml").is_some());
    }
}
