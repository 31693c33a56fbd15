//! Bridge runtime: capability probing, request dispatch, location forwarding.
//!
//! [`Bridge::start`] is the startup wiring for the whole bridge:
//!
//! 1. Probes the host services once and sends the resulting capability flags
//!    (plus the pass-through API key) on the one-shot init port.
//! 2. If the geolocation capability is present, starts the host watch and
//!    spawns the **location forwarder** task.
//! 3. Spawns the **request dispatcher** task, which serves the inbound
//!    request port until teardown.
//!
//! It returns a [`BridgeHandle`] — the explicit context object owning the
//! teardown path: [`BridgeHandle::shutdown`] stops the host watch and joins
//! the bridge tasks.  *Dropping* the handle, by contrast, leaves the bridge
//! streaming for the rest of the process lifetime, which is the behavior the
//! original runtime exhibited; only the explicit call tears down.
//!
//! # Ordering guarantees
//!
//! - Location events: one dedicated forwarder task reads the host watch
//!   channel and writes the location port, so events reach the UI in strict
//!   host-callback order, one event per callback, with no coalescing.
//! - Request notices: every request is served by its own fire-and-forget
//!   task, so two concurrent requests may settle — and notify — in either
//!   order.  Each request yields exactly one notice.
//!
//! # Failure containment
//!
//! No failure escapes the bridge: host rejections become failure notices,
//! host watch errors become [`LocationEvent::Failure`]s, and a UI that
//! dropped its ports simply ends the affected loop.  There is no fatal error
//! class in this layer.
//!
//! [`LocationEvent::Failure`]: crate::domain::LocationEvent

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::{
    build_share_request, clipboard_notice, normalize_watch_event, share_notice,
};
use crate::domain::config::BridgeConfig;
use crate::domain::host::HostWatchEvent;
use crate::domain::messages::{CapabilityFlags, LocationEvent, UiNotice, UiRequest};
use crate::infrastructure::host::{ClipboardHost, GeolocationHost, HostServices, ShareHost};
use crate::infrastructure::ui_port::UiPorts;

// ── Public API ────────────────────────────────────────────────────────────────

/// The bridge entry point.  See the module docs for the startup sequence.
pub struct Bridge;

impl Bridge {
    /// Probes the host, delivers the init payload, and spawns the bridge
    /// tasks.
    ///
    /// The capability probe runs exactly once, here, before anything else;
    /// the returned handle exposes the immutable snapshot via
    /// [`BridgeHandle::capabilities`].  Handlers only exist for services that
    /// are actually registered: a request arriving for an absent capability
    /// is dropped with a warning and produces no notice (the UI gates its
    /// controls on the init flags and should never send one).
    pub fn start(config: BridgeConfig, host: HostServices, ports: UiPorts) -> BridgeHandle {
        let flags = host.probe();
        info!(
            geolocation = flags.supports_geolocation,
            share = flags.supports_share,
            clipboard = flags.supports_clipboard,
            "host capabilities probed"
        );

        let UiPorts {
            init,
            requests,
            notices,
            locations,
        } = ports;

        // The init payload is the UI's first input.  A UI that already went
        // away is not an error — the bridge outlives nothing.
        if init.send(flags.init_payload(config.api_key.clone())).is_err() {
            debug!("UI dropped the init port before startup completed");
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut tasks: Vec<JoinHandle<()>> = Vec::new();

        // Location stream adapter: started unconditionally at startup when —
        // and only when — the capability is present.  The watch API is never
        // touched otherwise.
        let geolocation = host.geolocation();
        if let Some(geo) = &geolocation {
            let events = geo.start_watch();
            info!("host location watch started");
            tasks.push(tokio::spawn(forward_locations(
                events,
                locations,
                shutdown_rx.clone(),
            )));
        }

        // Request dispatcher: serves the inbound port until teardown.
        tasks.push(tokio::spawn(dispatch_requests(
            Arc::new(config),
            host.clipboard(),
            host.share(),
            requests,
            notices,
            shutdown_rx,
        )));

        BridgeHandle {
            flags,
            shutdown: shutdown_tx,
            geolocation,
            tasks,
        }
    }
}

/// Owning handle for a running bridge.
///
/// This is the explicit context object: it carries the capability snapshot
/// and the one teardown entry point.  Only one location watch exists per
/// handle; re-initialization requires shutting this handle down first.
pub struct BridgeHandle {
    flags: CapabilityFlags,
    shutdown: watch::Sender<bool>,
    geolocation: Option<Arc<dyn GeolocationHost>>,
    tasks: Vec<JoinHandle<()>>,
}

impl BridgeHandle {
    /// The immutable capability snapshot computed at startup.
    pub fn capabilities(&self) -> CapabilityFlags {
        self.flags
    }

    /// Tears the bridge down: stops the host location watch, signals both
    /// loops, and waits for them to finish.
    ///
    /// Host calls already in flight are left to settle on their own; their
    /// notices are delivered if the UI still listens and dropped otherwise.
    pub async fn shutdown(self) {
        info!("bridge shutdown requested");
        // Signal first, then close the watch: the forwarder exits on either.
        let _ = self.shutdown.send(true);
        if let Some(geo) = &self.geolocation {
            geo.stop_watch();
            debug!("host location watch stopped");
        }
        for task in self.tasks {
            // A panicked task is already logged by tokio; nothing to add.
            let _ = task.await;
        }
        info!("bridge stopped");
    }
}

// ── Location forwarder ────────────────────────────────────────────────────────

/// Forwards every host watch callback to the UI location port, in order.
///
/// Exits when the host closes the watch channel, the UI drops the location
/// port, or shutdown is signalled.  If the [`BridgeHandle`] is dropped
/// without `shutdown()`, the shutdown branch disarms itself and the stream
/// keeps running for the process lifetime.
async fn forward_locations(
    mut events: mpsc::Receiver<HostWatchEvent>,
    locations: mpsc::Sender<LocationEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    // Disarmed when the handle is dropped without an explicit shutdown.
    let mut shutdown_armed = true;

    loop {
        tokio::select! {
            changed = shutdown.changed(), if shutdown_armed => match changed {
                Ok(()) => {
                    debug!("location forwarder: shutdown signalled");
                    break;
                }
                Err(_) => {
                    // Handle dropped; stream until the process ends.
                    shutdown_armed = false;
                }
            },

            maybe_event = events.recv() => match maybe_event {
                Some(host_event) => {
                    // Single emission point: success and error callbacks both
                    // normalize here, one LocationEvent per callback.
                    let event = normalize_watch_event(host_event);
                    debug!(?event, "forwarding location event");
                    if locations.send(event).await.is_err() {
                        debug!("location forwarder: UI dropped the location port");
                        break;
                    }
                }
                None => {
                    debug!("location forwarder: host watch channel closed");
                    break;
                }
            },
        }
    }
}

// ── Request dispatcher ────────────────────────────────────────────────────────

/// Serves the inbound request port until it closes or shutdown is signalled.
///
/// Each request is handed to its own fire-and-forget task so a slow host
/// call never blocks the next request; the dispatcher itself never awaits a
/// host operation.
async fn dispatch_requests(
    config: Arc<BridgeConfig>,
    clipboard: Option<Arc<dyn ClipboardHost>>,
    share: Option<Arc<dyn ShareHost>>,
    mut requests: mpsc::Receiver<UiRequest>,
    notices: mpsc::Sender<UiNotice>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut shutdown_armed = true;

    loop {
        tokio::select! {
            changed = shutdown.changed(), if shutdown_armed => match changed {
                Ok(()) => {
                    debug!("request dispatcher: shutdown signalled");
                    break;
                }
                Err(_) => {
                    shutdown_armed = false;
                }
            },

            maybe_request = requests.recv() => match maybe_request {
                Some(request) => {
                    dispatch_one(request, &config, &clipboard, &share, &notices);
                }
                None => {
                    debug!("request dispatcher: UI dropped the request port");
                    break;
                }
            },
        }
    }
}

/// Spawns the fire-and-forget handler for one request.
///
/// Never blocks: the host call runs in its own task, and exactly one notice
/// is emitted once it settles.  A request for an unregistered service is
/// dropped with a warning — the UI's own capability gating makes this a
/// should-never-happen path.
fn dispatch_one(
    request: UiRequest,
    config: &Arc<BridgeConfig>,
    clipboard: &Option<Arc<dyn ClipboardHost>>,
    share: &Option<Arc<dyn ShareHost>>,
    notices: &mpsc::Sender<UiNotice>,
) {
    match request {
        UiRequest::CopyToClipboard { text } => {
            let Some(clipboard) = clipboard.clone() else {
                warn!("dropping clipboard request: capability absent");
                return;
            };
            let notices = notices.clone();
            tokio::spawn(async move {
                let result = clipboard.write_text(text).await;
                match &result {
                    Ok(()) => info!("clipboard write fulfilled"),
                    Err(rejection) => info!(reason = %rejection.reason, "clipboard write rejected"),
                }
                if notices.send(clipboard_notice(result)).await.is_err() {
                    debug!("UI dropped the notice port");
                }
            });
        }

        UiRequest::Share { address } => {
            let Some(share) = share.clone() else {
                warn!("dropping share request: capability absent");
                return;
            };
            // The structured payload is derived immediately before dispatch
            // and moved into the host call — never retained.
            let payload = build_share_request(&address, config);
            let notices = notices.clone();
            tokio::spawn(async move {
                let result = share.share(payload).await;
                match &result {
                    Ok(()) => info!("share fulfilled"),
                    Err(rejection) => info!(reason = %rejection.reason, "share rejected"),
                }
                if notices.send(share_notice(result)).await.is_err() {
                    debug!("UI dropped the notice port");
                }
            });
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::host::HostPosition;
    use crate::infrastructure::mock::{MockClipboard, MockGeolocation, MockShare};
    use crate::infrastructure::ui_port::ui_channel;

    fn full_host(
        clipboard: Arc<MockClipboard>,
        share: Arc<MockShare>,
        geolocation: Arc<MockGeolocation>,
    ) -> HostServices {
        HostServices::new()
            .with_clipboard(clipboard)
            .with_share(share)
            .with_geolocation(geolocation)
    }

    #[tokio::test]
    async fn test_init_payload_mirrors_probed_capabilities() {
        // Arrange: only the clipboard service is present
        let host = HostServices::new().with_clipboard(Arc::new(MockClipboard::succeeding()));
        let (ports, handle) = ui_channel(8);
        let config = BridgeConfig {
            api_key: "the-key".to_string(),
            ..BridgeConfig::default()
        };

        // Act
        let bridge = Bridge::start(config, host, ports);
        let init = handle.init.await.unwrap();

        // Assert
        assert_eq!(init.api_key, "the-key");
        assert!(init.support_clipboard);
        assert!(!init.support_web_share_api);
        assert!(!init.support_geolocation);
        bridge.shutdown().await;
    }

    #[tokio::test]
    async fn test_clipboard_request_reaches_host_with_payload() {
        // Arrange
        let clipboard = Arc::new(MockClipboard::succeeding());
        let host = full_host(
            Arc::clone(&clipboard),
            Arc::new(MockShare::succeeding()),
            MockGeolocation::shared(),
        );
        let (ports, mut handle) = ui_channel(8);
        let bridge = Bridge::start(BridgeConfig::default(), host, ports);

        // Act
        handle
            .requests
            .send(UiRequest::CopyToClipboard {
                text: "apple.banana.cherry".to_string(),
            })
            .await
            .unwrap();
        let notice = handle.notices.recv().await.unwrap();

        // Assert
        assert_eq!(notice, UiNotice::ClipboardWriteSucceeded);
        assert_eq!(clipboard.writes(), vec!["apple.banana.cherry".to_string()]);
        bridge.shutdown().await;
    }

    #[tokio::test]
    async fn test_share_request_carries_derived_payload() {
        // Arrange
        let share = Arc::new(MockShare::succeeding());
        let host = HostServices::new().with_share(Arc::clone(&share) as Arc<dyn ShareHost>);
        let (ports, mut handle) = ui_channel(8);
        let bridge = Bridge::start(BridgeConfig::default(), host, ports);

        // Act
        handle
            .requests
            .send(UiRequest::Share {
                address: "filled.count.soap".to_string(),
            })
            .await
            .unwrap();
        let notice = handle.notices.recv().await.unwrap();

        // Assert: the host saw title/body/url derived from the address
        assert_eq!(notice, UiNotice::ShareSucceeded);
        let requests = share.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].title, "w3w-encounter");
        assert_eq!(requests[0].url, "https://w3w.co/filled.count.soap");
        bridge.shutdown().await;
    }

    #[tokio::test]
    async fn test_location_events_forward_in_callback_order() {
        // Arrange
        let geolocation = MockGeolocation::shared();
        let host = HostServices::new().with_geolocation(Arc::clone(&geolocation) as Arc<dyn GeolocationHost>);
        let (ports, mut handle) = ui_channel(8);
        let bridge = Bridge::start(BridgeConfig::default(), host, ports);

        // Act: a success callback followed by an error callback
        geolocation.inject(HostWatchEvent::Position(HostPosition {
            latitude: 35.0,
            longitude: 139.0,
        }));
        geolocation.inject(HostWatchEvent::Error(1));

        // Assert: order and cardinality preserved, one event per callback
        assert_eq!(
            handle.locations.recv().await,
            Some(LocationEvent::Position {
                latitude: 35.0,
                longitude: 139.0
            })
        );
        assert_eq!(
            handle.locations.recv().await,
            Some(LocationEvent::Failure {
                code: crate::domain::messages::LocationErrorCode::PERMISSION_DENIED
            })
        );
        bridge.shutdown().await;
    }

    #[tokio::test]
    async fn test_absent_geolocation_never_starts_watch() {
        // Arrange: geolocation service registered nowhere
        let geolocation = MockGeolocation::shared();
        let host = HostServices::new().with_clipboard(Arc::new(MockClipboard::succeeding()));
        let (ports, handle) = ui_channel(8);

        // Act
        let bridge = Bridge::start(BridgeConfig::default(), host, ports);
        let init = handle.init.await.unwrap();

        // Assert: flag false and the watch API untouched
        assert!(!init.support_geolocation);
        assert_eq!(geolocation.watch_count(), 0);
        bridge.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_the_host_watch() {
        // Arrange
        let geolocation = MockGeolocation::shared();
        let host = HostServices::new().with_geolocation(Arc::clone(&geolocation) as Arc<dyn GeolocationHost>);
        let (ports, mut handle) = ui_channel(8);
        let bridge = Bridge::start(BridgeConfig::default(), host, ports);
        assert_eq!(geolocation.watch_count(), 1);

        // Act
        bridge.shutdown().await;

        // Assert: the subscription is gone and the location port closed
        assert!(geolocation.is_stopped());
        assert!(handle.locations.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_request_for_absent_capability_is_dropped_silently() {
        // Arrange: share present, clipboard absent
        let host = HostServices::new().with_share(Arc::new(MockShare::succeeding()));
        let (ports, mut handle) = ui_channel(8);
        let bridge = Bridge::start(BridgeConfig::default(), host, ports);

        // Act: a clipboard request the UI should never have sent, then a
        // legitimate share request
        handle
            .requests
            .send(UiRequest::CopyToClipboard {
                text: "x".to_string(),
            })
            .await
            .unwrap();
        handle
            .requests
            .send(UiRequest::Share {
                address: "a.b.c".to_string(),
            })
            .await
            .unwrap();

        // Assert: the only notice is for the share — the bad request neither
        // notified nor halted the dispatcher
        assert_eq!(handle.notices.recv().await, Some(UiNotice::ShareSucceeded));
        bridge.shutdown().await;
    }
}
