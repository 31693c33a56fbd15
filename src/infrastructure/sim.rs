//! Simulated host services for the demo binary.
//!
//! The real host services only exist inside a browser runtime.  To let the
//! bridge be run and observed on its own, this module provides stand-in
//! implementations: a geolocation service that replays a configured tour of
//! fixes on a timer, and clipboard/share services that log the payload and
//! fulfil.
//!
//! These are development aids, kept alongside the production traits the same
//! way mock platform backends sit beside the real ones.  Tests use
//! [`mock`](super::mock) instead, which gives them explicit control over
//! outcomes and callbacks.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::{mpsc, Notify};
use tracing::{debug, info};

use crate::domain::host::{HostPosition, HostRejection, HostWatchEvent, ShareRequest};
use crate::domain::messages::LocationErrorCode;
use crate::infrastructure::host::{ClipboardHost, GeolocationHost, ShareHost};

// ── Clipboard ─────────────────────────────────────────────────────────────────

/// A clipboard that logs the written text and always fulfils.
#[derive(Debug, Default)]
pub struct SimulatedClipboard;

impl ClipboardHost for SimulatedClipboard {
    fn write_text(&self, text: String) -> BoxFuture<'static, Result<(), HostRejection>> {
        Box::pin(async move {
            info!(%text, "simulated clipboard write");
            Ok(())
        })
    }
}

// ── Share ─────────────────────────────────────────────────────────────────────

/// A share sheet that logs the payload and always fulfils.
#[derive(Debug, Default)]
pub struct SimulatedShare;

impl ShareHost for SimulatedShare {
    fn share(&self, request: ShareRequest) -> BoxFuture<'static, Result<(), HostRejection>> {
        Box::pin(async move {
            info!(title = %request.title, url = %request.url, "simulated share");
            Ok(())
        })
    }
}

// ── Geolocation ───────────────────────────────────────────────────────────────

/// A geolocation watch that replays a fixed tour of positions.
///
/// Every `interval` the next fix in the tour is delivered as a success
/// callback, wrapping around at the end.  With an empty tour the watch
/// instead delivers a `POSITION_UNAVAILABLE` error each tick, which exercises
/// the failure path end to end.
pub struct SimulatedGeolocation {
    fixes: Vec<HostPosition>,
    interval: Duration,
    stop: Arc<Notify>,
}

impl SimulatedGeolocation {
    /// Creates a watch replaying `fixes` at the given interval.
    pub fn new(fixes: Vec<HostPosition>, interval: Duration) -> Self {
        Self {
            fixes,
            interval,
            stop: Arc::new(Notify::new()),
        }
    }
}

impl GeolocationHost for SimulatedGeolocation {
    fn start_watch(&self) -> mpsc::Receiver<HostWatchEvent> {
        let (tx, rx) = mpsc::channel(16);
        let fixes = self.fixes.clone();
        let interval = self.interval;
        let stop = Arc::clone(&self.stop);

        tokio::spawn(async move {
            let mut next = 0usize;
            loop {
                tokio::select! {
                    _ = stop.notified() => {
                        debug!("simulated watch stopped");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {
                        let event = if fixes.is_empty() {
                            HostWatchEvent::Error(LocationErrorCode::POSITION_UNAVAILABLE.0)
                        } else {
                            let fix = fixes[next % fixes.len()];
                            next += 1;
                            HostWatchEvent::Position(fix)
                        };
                        if tx.send(event).await.is_err() {
                            debug!("simulated watch receiver dropped");
                            break;
                        }
                    }
                }
            }
            // Dropping `tx` here closes the watch channel.
        });

        rx
    }

    fn stop_watch(&self) {
        // `notify_one` stores a permit when the watch task is not currently
        // parked on `notified()`, so a stop can never be lost to a race.
        self.stop.notify_one();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_clipboard_always_fulfils() {
        let clipboard = SimulatedClipboard;
        let result = clipboard.write_text("abc".to_string()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_simulated_watch_replays_fixes_in_order() {
        // Arrange: a two-stop tour on a fast clock
        let watch = SimulatedGeolocation::new(
            vec![
                HostPosition {
                    latitude: 1.0,
                    longitude: 2.0,
                },
                HostPosition {
                    latitude: 3.0,
                    longitude: 4.0,
                },
            ],
            Duration::from_millis(1),
        );
        let mut rx = watch.start_watch();

        // Act / Assert: the tour replays in order and wraps around
        for expected in [1.0, 3.0, 1.0] {
            match rx.recv().await {
                Some(HostWatchEvent::Position(p)) => assert_eq!(p.latitude, expected),
                other => panic!("expected a position, got {other:?}"),
            }
        }
        watch.stop_watch();
    }

    #[tokio::test]
    async fn test_simulated_watch_with_no_fixes_reports_unavailable() {
        let watch = SimulatedGeolocation::new(Vec::new(), Duration::from_millis(1));
        let mut rx = watch.start_watch();
        assert!(matches!(
            rx.recv().await,
            Some(HostWatchEvent::Error(code)) if code == LocationErrorCode::POSITION_UNAVAILABLE.0
        ));
        watch.stop_watch();
    }

    #[tokio::test]
    async fn test_simulated_watch_stop_closes_channel() {
        // Arrange: a slow tick so stop lands before the first event
        let watch = SimulatedGeolocation::new(Vec::new(), Duration::from_secs(3600));
        let mut rx = watch.start_watch();

        // Act
        watch.stop_watch();

        // Assert
        assert!(rx.recv().await.is_none());
    }
}
