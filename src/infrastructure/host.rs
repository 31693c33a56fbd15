//! Host service boundary: traits and the capability prober.
//!
//! Each browser-provided service the bridge can use is modeled as a trait.
//! Production implementations wrap the actual host runtime; tests use the
//! scripted implementations in [`mock`](super::mock); the demo binary uses
//! [`sim`](super::sim).
//!
//! # Dyn-safe async
//!
//! The clipboard and share operations are async host calls, but `async fn`
//! in a trait is not object-safe.  The traits therefore return
//! [`BoxFuture`]s, which keeps `Arc<dyn ClipboardHost>` usable as a service
//! handle.
//!
//! # Capability probing
//!
//! [`HostServices`] holds one *optional* handle per service.  Probing is a
//! pure presence check — a service is "supported" exactly when a handle was
//! registered, and the probe never invokes anything.  Absence is a normal,
//! expected outcome, never an error, so [`HostServices::probe`] is
//! infallible.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::mpsc;

use crate::domain::host::{HostRejection, HostWatchEvent, ShareRequest};
use crate::domain::messages::CapabilityFlags;

// ── Service traits ────────────────────────────────────────────────────────────

/// Asynchronous clipboard write, as exposed by the host.
pub trait ClipboardHost: Send + Sync {
    /// Writes `text` to the host clipboard.
    ///
    /// Resolves to `Ok(())` on fulfillment or a [`HostRejection`] (for
    /// example, the user denied the clipboard permission).  Rejection is a
    /// normal outcome; callers convert it to a UI notice.
    fn write_text(&self, text: String) -> BoxFuture<'static, Result<(), HostRejection>>;
}

/// The native share sheet, as exposed by the host.
pub trait ShareHost: Send + Sync {
    /// Opens the share sheet with the given payload.
    ///
    /// Resolves to `Ok(())` when the user completed the share, or a
    /// [`HostRejection`] when the sheet was dismissed or no share target
    /// matched.
    fn share(&self, request: ShareRequest) -> BoxFuture<'static, Result<(), HostRejection>>;
}

/// Continuous geolocation watch, as exposed by the host.
///
/// Modeled after the channel-returning source pattern: starting the watch
/// hands back a receiver, and every host callback (success or error) arrives
/// as one [`HostWatchEvent`] in callback order.
pub trait GeolocationHost: Send + Sync {
    /// Starts the continuous position watch and returns the event stream.
    ///
    /// Only one watch is active per bridge instance; the bridge calls this at
    /// most once.
    fn start_watch(&self) -> mpsc::Receiver<HostWatchEvent>;

    /// Stops the watch and releases the host subscription.
    ///
    /// After this call the event channel closes once in-flight callbacks
    /// drain.  Idempotent: stopping an already-stopped watch is a no-op.
    fn stop_watch(&self);
}

// ── Service registry + prober ─────────────────────────────────────────────────

/// The set of host services available to this process.
///
/// Built once at startup by whatever embeds the bridge: register a handle for
/// each service the host actually exposes and leave the rest unset.  The
/// capability flags the UI receives are derived from exactly this presence
/// information, so a request handler only ever exists for a service that was
/// registered.
#[derive(Clone, Default)]
pub struct HostServices {
    clipboard: Option<Arc<dyn ClipboardHost>>,
    share: Option<Arc<dyn ShareHost>>,
    geolocation: Option<Arc<dyn GeolocationHost>>,
}

impl HostServices {
    /// A host exposing no services at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a clipboard service.
    pub fn with_clipboard(mut self, clipboard: Arc<dyn ClipboardHost>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    /// Registers a share service.
    pub fn with_share(mut self, share: Arc<dyn ShareHost>) -> Self {
        self.share = Some(share);
        self
    }

    /// Registers a geolocation service.
    pub fn with_geolocation(mut self, geolocation: Arc<dyn GeolocationHost>) -> Self {
        self.geolocation = Some(geolocation);
        self
    }

    /// Probes the host environment for capability flags.
    ///
    /// Pure presence check: `true` if and only if the corresponding service
    /// handle was registered.  Never invokes a service, never fails.  Run
    /// exactly once at startup; the returned snapshot is immutable for the
    /// process lifetime.
    pub fn probe(&self) -> CapabilityFlags {
        CapabilityFlags {
            supports_geolocation: self.geolocation.is_some(),
            supports_share: self.share.is_some(),
            supports_clipboard: self.clipboard.is_some(),
        }
    }

    /// Returns the clipboard handle, if registered.
    pub(crate) fn clipboard(&self) -> Option<Arc<dyn ClipboardHost>> {
        self.clipboard.clone()
    }

    /// Returns the share handle, if registered.
    pub(crate) fn share(&self) -> Option<Arc<dyn ShareHost>> {
        self.share.clone()
    }

    /// Returns the geolocation handle, if registered.
    pub(crate) fn geolocation(&self) -> Option<Arc<dyn GeolocationHost>> {
        self.geolocation.clone()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
