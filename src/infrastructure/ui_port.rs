//! Typed message ports between the bridge and the UI runtime.
//!
//! The bridge/UI message contract is realized as a pair of structs created by
//! [`ui_channel`]: the bridge keeps [`UiPorts`], the UI runtime keeps
//! [`UiHandle`].  Each port is a one-way tokio channel carrying exactly one
//! message type, so shape drift between the two sides is a compile error.
//!
//! ```text
//! UiHandle (UI side)                    UiPorts (bridge side)
//! ──────────────────────────────────────────────────────────
//! init:      oneshot::Receiver   ←──    oneshot::Sender      InitPayload
//! requests:  mpsc::Sender        ──→    mpsc::Receiver       UiRequest
//! notices:   mpsc::Receiver      ←──    mpsc::Sender         UiNotice
//! locations: mpsc::Receiver      ←──    mpsc::Sender         LocationEvent
//! ```
//!
//! The request/notice/location channels are bounded; a channel decouples the
//! producing and consuming tasks while preserving per-channel ordering, which
//! is what carries the strict location-event ordering guarantee.

use tokio::sync::{mpsc, oneshot};

use crate::domain::messages::{InitPayload, LocationEvent, UiNotice, UiRequest};

/// The bridge's side of the UI port pair.
///
/// Consumed by [`Bridge::start`](crate::infrastructure::bridge::Bridge::start);
/// the fields are public so alternative runtimes can wire them differently.
pub struct UiPorts {
    /// One-shot init port: the capability flags + API key payload.
    pub init: oneshot::Sender<InitPayload>,
    /// Inbound request port (UI → bridge).
    pub requests: mpsc::Receiver<UiRequest>,
    /// Outbound notification port (bridge → UI).
    pub notices: mpsc::Sender<UiNotice>,
    /// Outbound location port (bridge → UI), strictly ordered.
    pub locations: mpsc::Sender<LocationEvent>,
}

/// The UI runtime's side of the port pair.
pub struct UiHandle {
    /// Receives the one-shot [`InitPayload`] before any other message.
    pub init: oneshot::Receiver<InitPayload>,
    /// Sends [`UiRequest`]s to the bridge.
    pub requests: mpsc::Sender<UiRequest>,
    /// Receives one [`UiNotice`] per request (in settlement order, which may
    /// differ from submission order).
    pub notices: mpsc::Receiver<UiNotice>,
    /// Receives [`LocationEvent`]s in host-callback order.
    pub locations: mpsc::Receiver<LocationEvent>,
}

/// Creates a connected [`UiPorts`] / [`UiHandle`] pair.
///
/// `capacity` bounds each mpsc port; it must be non-zero (tokio panics on a
/// zero-capacity channel).
///
/// # Example
///
/// ```rust
/// use w3w_host_bridge::infrastructure::ui_channel;
///
/// let (ports, handle) = ui_channel(32);
/// # drop((ports, handle));
/// ```
pub fn ui_channel(capacity: usize) -> (UiPorts, UiHandle) {
    let (init_tx, init_rx) = oneshot::channel();
    let (request_tx, request_rx) = mpsc::channel(capacity);
    let (notice_tx, notice_rx) = mpsc::channel(capacity);
    let (location_tx, location_rx) = mpsc::channel(capacity);

    (
        UiPorts {
            init: init_tx,
            requests: request_rx,
            notices: notice_tx,
            locations: location_tx,
        },
        UiHandle {
            init: init_rx,
            requests: request_tx,
            notices: notice_rx,
            locations: location_rx,
        },
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::messages::CapabilityFlags;

    #[tokio::test]
    async fn test_request_port_connects_ui_to_bridge() {
        // Arrange
        let (mut ports, handle) = ui_channel(4);

        // Act
        handle
            .requests
            .send(UiRequest::CopyToClipboard {
                text: "abc".to_string(),
            })
            .await
            .unwrap();

        // Assert
        let received = ports.requests.recv().await.unwrap();
        assert_eq!(
            received,
            UiRequest::CopyToClipboard {
                text: "abc".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_init_port_is_one_shot() {
        // Arrange
        let (ports, handle) = ui_channel(4);
        let payload = CapabilityFlags::NONE.init_payload("key");

        // Act
        ports.init.send(payload.clone()).unwrap();

        // Assert: the UI receives exactly the payload sent
        let received = handle.init.await.unwrap();
        assert_eq!(received, payload);
    }

    #[tokio::test]
    async fn test_location_port_preserves_order() {
        // Arrange
        let (ports, mut handle) = ui_channel(4);
        let first = LocationEvent::Position {
            latitude: 1.0,
            longitude: 2.0,
        };
        let second = LocationEvent::Failure {
            code: crate::domain::messages::LocationErrorCode::TIMEOUT,
        };

        // Act
        ports.locations.send(first).await.unwrap();
        ports.locations.send(second).await.unwrap();

        // Assert
        assert_eq!(handle.locations.recv().await, Some(first));
        assert_eq!(handle.locations.recv().await, Some(second));
    }

    #[tokio::test]
    async fn test_dropped_ui_closes_request_port() {
        // Arrange
        let (mut ports, handle) = ui_channel(4);

        // Act: the UI side goes away
        drop(handle);

        // Assert: the bridge observes end-of-stream rather than hanging
        assert!(ports.requests.recv().await.is_none());
    }
}
