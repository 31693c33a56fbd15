//! Scripted mock hosts for unit and integration testing.
//!
//! Allows tests to force clipboard/share outcomes and to inject synthetic
//! geolocation callbacks without a real host runtime, in the same spirit as a
//! hand-rolled mock event source: the test holds the mock, injects events or
//! fixes outcomes, and observes what the bridge emits.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, Mutex,
};

use futures_util::future::BoxFuture;
use tokio::sync::mpsc::{self, Sender};

use crate::domain::host::{HostRejection, HostWatchEvent, ShareRequest};
use crate::infrastructure::host::{ClipboardHost, GeolocationHost, ShareHost};

/// Buffer size for injected watch events.  Tests inject synchronously with
/// `try_send`, so the buffer must cover the longest injected sequence.
const MOCK_WATCH_CAPACITY: usize = 64;

// ── Clipboard mock ────────────────────────────────────────────────────────────

/// A [`ClipboardHost`] whose outcome is fixed by the test.
///
/// Records every written text so tests can assert on the payload.
pub struct MockClipboard {
    outcome: Result<(), HostRejection>,
    writes: Mutex<Vec<String>>,
}

impl MockClipboard {
    /// A clipboard whose writes always fulfil.
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(()),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// A clipboard whose writes are always rejected with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(HostRejection::new(reason)),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Every text written so far, in call order.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().expect("lock poisoned").clone()
    }
}

impl ClipboardHost for MockClipboard {
    fn write_text(&self, text: String) -> BoxFuture<'static, Result<(), HostRejection>> {
        self.writes.lock().expect("lock poisoned").push(text);
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}

// ── Share mock ────────────────────────────────────────────────────────────────

/// A [`ShareHost`] whose outcome is fixed by the test.
///
/// Records every share payload so tests can assert the derived title, body,
/// and URL.
pub struct MockShare {
    outcome: Result<(), HostRejection>,
    requests: Mutex<Vec<ShareRequest>>,
}

impl MockShare {
    /// A share sheet that always completes.
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A share sheet that is always dismissed with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(HostRejection::new(reason)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every share payload received so far, in call order.
    pub fn requests(&self) -> Vec<ShareRequest> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

impl ShareHost for MockShare {
    fn share(&self, request: ShareRequest) -> BoxFuture<'static, Result<(), HostRejection>> {
        self.requests.lock().expect("lock poisoned").push(request);
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}

// ── Geolocation mock ──────────────────────────────────────────────────────────

/// A [`GeolocationHost`] that lets tests inject watch callbacks.
///
/// `start_watch` hands the sender side to the mock; tests then call
/// [`inject`](Self::inject) to simulate host callbacks.  [`stop_watch`]
/// drops the sender, closing the event channel exactly like a torn-down host
/// subscription.
///
/// [`stop_watch`]: GeolocationHost::stop_watch
pub struct MockGeolocation {
    sender: Mutex<Option<Sender<HostWatchEvent>>>,
    watch_count: AtomicU32,
}

impl MockGeolocation {
    /// Creates a mock with no active watch.
    pub fn new() -> Self {
        Self {
            sender: Mutex::new(None),
            watch_count: AtomicU32::new(0),
        }
    }

    /// Creates the mock pre-wrapped in an [`Arc`] for registration.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Injects a synthetic watch callback, as if the host fired one.
    ///
    /// Panics if `start_watch` has not been called or the watch was stopped —
    /// a test injecting into a dead watch is a test bug.
    pub fn inject(&self, event: HostWatchEvent) {
        let guard = self.sender.lock().expect("lock poisoned");
        let sender = guard
            .as_ref()
            .expect("MockGeolocation::inject called before start_watch()");
        sender
            .try_send(event)
            .expect("mock watch buffer full or receiver dropped");
    }

    /// Number of times `start_watch` was invoked.
    ///
    /// Lets tests assert the watch API is *never* touched when the
    /// geolocation capability is absent, and touched exactly once otherwise.
    pub fn watch_count(&self) -> u32 {
        self.watch_count.load(Ordering::SeqCst)
    }

    /// `true` once `stop_watch` (or never `start_watch`) leaves no active
    /// subscription.
    pub fn is_stopped(&self) -> bool {
        self.sender.lock().expect("lock poisoned").is_none()
    }
}

impl Default for MockGeolocation {
    fn default() -> Self {
        Self::new()
    }
}

impl GeolocationHost for MockGeolocation {
    fn start_watch(&self) -> mpsc::Receiver<HostWatchEvent> {
        self.watch_count.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(MOCK_WATCH_CAPACITY);
        *self.sender.lock().expect("lock poisoned") = Some(tx);
        rx
    }

    fn stop_watch(&self) {
        // Dropping the sender closes the event channel.
        *self.sender.lock().expect("lock poisoned") = None;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::host::HostPosition;

    #[tokio::test]
    async fn test_mock_clipboard_records_writes_and_fulfils() {
        // Arrange
        let clipboard = MockClipboard::succeeding();

        // Act
        let result = clipboard.write_text("apple.banana.cherry".to_string()).await;

        // Assert
        assert!(result.is_ok());
        assert_eq!(clipboard.writes(), vec!["apple.banana.cherry".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_clipboard_rejects_with_reason() {
        let clipboard = MockClipboard::rejecting("permission denied");
        let result = clipboard.write_text("x".to_string()).await;
        assert_eq!(result, Err(HostRejection::new("permission denied")));
    }

    #[tokio::test]
    async fn test_mock_share_records_request() {
        // Arrange
        let share = MockShare::succeeding();
        let request = ShareRequest {
            title: "t".to_string(),
            body: "b".to_string(),
            url: "u".to_string(),
        };

        // Act
        let result = share.share(request.clone()).await;

        // Assert
        assert!(result.is_ok());
        assert_eq!(share.requests(), vec![request]);
    }

    #[tokio::test]
    async fn test_mock_geolocation_injects_events_in_order() {
        // Arrange
        let geolocation = MockGeolocation::new();
        let mut rx = geolocation.start_watch();

        // Act
        geolocation.inject(HostWatchEvent::Position(HostPosition {
            latitude: 1.0,
            longitude: 2.0,
        }));
        geolocation.inject(HostWatchEvent::Error(3));

        // Assert: order preserved
        assert!(matches!(
            rx.recv().await,
            Some(HostWatchEvent::Position(HostPosition {
                latitude, ..
            })) if latitude == 1.0
        ));
        assert!(matches!(rx.recv().await, Some(HostWatchEvent::Error(3))));
    }

    #[tokio::test]
    async fn test_mock_geolocation_stop_closes_channel() {
        // Arrange
        let geolocation = MockGeolocation::new();
        let mut rx = geolocation.start_watch();

        // Act
        geolocation.stop_watch();

        // Assert: the receiver observes end-of-stream
        assert!(rx.recv().await.is_none());
        assert!(geolocation.is_stopped());
    }

    #[test]
    fn test_mock_geolocation_counts_watch_starts() {
        let geolocation = MockGeolocation::new();
        assert_eq!(geolocation.watch_count(), 0);
        let _rx = geolocation.start_watch();
        assert_eq!(geolocation.watch_count(), 1);
    }
}
