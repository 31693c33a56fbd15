//! Typed message-port contract between the bridge and the UI runtime.
//!
//! The UI runtime and the bridge communicate only through one-way typed
//! ports.  Every message crossing a port is defined here, so a shape change on
//! either side is a compile-time error rather than silent drift.
//!
//! # Message flow
//!
//! ```text
//! Bridge → UI (one-shot):   InitPayload        (capability flags + API key)
//! UI → Bridge:              UiRequest          (copy-to-clipboard, share)
//! Bridge → UI:              UiNotice           (per-request success/failure)
//! Bridge → UI (continuous): LocationEvent      (one per host location callback)
//! ```
//!
//! # JSON discriminant
//!
//! Request and notice enums carry a `"type"` field that identifies the
//! variant, with all other fields flattened into the same object:
//!
//! ```json
//! {"type":"CopyToClipboard","text":"apple.banana.cherry"}
//! {"type":"ShareFailed","reason":"share sheet dismissed"}
//! ```
//!
//! Serde's `#[serde(tag = "type")]` attribute handles this automatically.
//!
//! # Canonical location schema
//!
//! Observed UI variants disagreed on the coordinate key names (`lat`/`lng`
//! versus `latitude`/`longitude`).  This crate fixes one canonical schema:
//! the Rust type spells out `latitude`/`longitude`, the JSON wire form uses
//! the compact `lat`/`lng` keys together with `errorCode`:
//!
//! ```json
//! {"location":{"lat":35.0,"lng":139.0},"errorCode":null}
//! {"location":null,"errorCode":1}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Capability flags and init payload ─────────────────────────────────────────

/// Which host services are usable in the current environment.
///
/// Computed exactly once at startup by probing the host for *presence* of each
/// service — the probe never invokes a service.  The snapshot is immutable for
/// the bridge's lifetime; the UI branches its behavior on these flags (for
/// example, hiding the share button when `supports_share` is `false`) and the
/// bridge never re-checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityFlags {
    /// The host exposes a continuous geolocation watch.
    pub supports_geolocation: bool,
    /// The host exposes the native share sheet.
    pub supports_share: bool,
    /// The host exposes asynchronous clipboard write.
    pub supports_clipboard: bool,
}

impl CapabilityFlags {
    /// A host with no services at all.  Useful as a test baseline.
    pub const NONE: Self = Self {
        supports_geolocation: false,
        supports_share: false,
        supports_clipboard: false,
    };

    /// Combines the flags with the pass-through API key into the one-shot
    /// [`InitPayload`] delivered to the UI before anything else.
    pub fn init_payload(self, api_key: impl Into<String>) -> InitPayload {
        InitPayload {
            api_key: api_key.into(),
            support_geolocation: self.supports_geolocation,
            support_web_share_api: self.supports_share,
            support_clipboard: self.supports_clipboard,
        }
    }
}

/// One-shot initialization input for the UI runtime.
///
/// Sent on the init port exactly once, before any notice or location event.
/// The field names on the wire match what the UI's flag decoder expects.
///
/// # Serde representation
///
/// ```json
/// {"apiKey":"...","supportGeolocation":true,"supportWebShareAPI":false,"supportClipboard":true}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitPayload {
    /// what3words API key, passed through unchanged from the environment.
    /// The bridge never uses it; the UI needs it for address lookups.
    #[serde(rename = "apiKey")]
    pub api_key: String,
    /// Mirror of [`CapabilityFlags::supports_geolocation`].
    #[serde(rename = "supportGeolocation")]
    pub support_geolocation: bool,
    /// Mirror of [`CapabilityFlags::supports_share`].
    #[serde(rename = "supportWebShareAPI")]
    pub support_web_share_api: bool,
    /// Mirror of [`CapabilityFlags::supports_clipboard`].
    #[serde(rename = "supportClipboard")]
    pub support_clipboard: bool,
}

// ── UI → Bridge requests ──────────────────────────────────────────────────────

/// All requests the UI can send to the bridge.
///
/// Each request is independent: no deduplication, no in-flight coalescing.
/// The bridge answers every request with exactly one [`UiNotice`], but notices
/// for concurrent requests may arrive in any order.
///
/// # Serde representation
///
/// ```json
/// {"type":"CopyToClipboard","text":"apple.banana.cherry"}
/// {"type":"Share","address":"apple.banana.cherry"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiRequest {
    /// Write the given text to the host clipboard.
    CopyToClipboard {
        /// The text to copy — typically the current three-word address.
        text: String,
    },

    /// Open the native share sheet for a three-word address.
    ///
    /// The bridge derives the share title, body, and URL from this address
    /// and its configured templates immediately before dispatch; the derived
    /// payload is not retained after the host call.
    Share {
        /// The three-word address to share (e.g., `"apple.banana.cherry"`).
        address: String,
    },
}

// ── Bridge → UI notices ───────────────────────────────────────────────────────

/// Transient per-request outcome notifications sent to the UI.
///
/// Every [`UiRequest`] produces exactly one notice — never both a success and
/// a failure, never zero.  A failure is a normal, recoverable outcome (the
/// user denied clipboard permission, dismissed the share sheet, ...); it
/// carries the host-supplied reason and never halts future requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiNotice {
    /// The host clipboard write resolved successfully.
    ClipboardWriteSucceeded,
    /// The host rejected the clipboard write.
    ClipboardWriteFailed {
        /// Host-supplied rejection reason, treated opaquely.
        reason: String,
    },
    /// The native share call resolved successfully.
    ShareSucceeded,
    /// The host rejected the share call.
    ShareFailed {
        /// Host-supplied rejection reason, treated opaquely.
        reason: String,
    },
}

// ── Location events ───────────────────────────────────────────────────────────

/// Host-defined geolocation error code, treated opaquely by the bridge.
///
/// The well-known W3C codes get named constants, but any value round-trips
/// unchanged — the UI decides display and retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationErrorCode(pub u8);

impl LocationErrorCode {
    /// The user denied the geolocation permission prompt.
    pub const PERMISSION_DENIED: Self = Self(1);
    /// The host could not determine a position.
    pub const POSITION_UNAVAILABLE: Self = Self(2);
    /// The host's position fetch timed out.
    pub const TIMEOUT: Self = Self(3);
}

/// One normalized geolocation update: a successful reading *or* an error,
/// never both, never neither.
///
/// Every host location callback — success or failure — becomes exactly one
/// `LocationEvent`, emitted in callback order with no buffering, coalescing,
/// or reordering.
///
/// # Wire form and validation
///
/// The UI's decoder expects the two-field `{"location":...,"errorCode":...}`
/// object, so serialization goes through [`LocationEventWire`].  On the way
/// *in*, the wire form is validated: a frame with both fields set (or both
/// null) is rejected with a [`WireError`] instead of being silently coerced.
/// The mutual exclusivity the Rust enum guarantees by construction is thereby
/// enforced at the port boundary too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "LocationEventWire", try_from = "LocationEventWire")]
pub enum LocationEvent {
    /// A successful host position reading.
    Position {
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
    },
    /// A host location error (permission denied, unavailable, timeout, ...).
    Failure {
        /// The host's error code, forwarded unchanged.
        code: LocationErrorCode,
    },
}

/// A location event frame that violated the port schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// The frame carried both a position and an error code.
    #[error("location event carries both a position and an error code")]
    BothPresent,
    /// The frame carried neither a position nor an error code.
    #[error("location event carries neither a position nor an error code")]
    BothAbsent,
}

/// The JSON shadow of [`LocationEvent`]: two independently-nullable fields.
///
/// This shape exists only at the serde boundary.  Inside the bridge the
/// discriminated union is the sole representation, so the "both present" and
/// "both absent" states are unrepresentable everywhere except in incoming
/// JSON — where [`TryFrom`] rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationEventWire {
    /// The coordinates, or `null` on failure.
    location: Option<WireCoordinates>,
    /// The host error code, or `null` on success.
    #[serde(rename = "errorCode")]
    error_code: Option<u8>,
}

/// Coordinate pair in the compact wire spelling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct WireCoordinates {
    lat: f64,
    lng: f64,
}

impl From<LocationEvent> for LocationEventWire {
    fn from(event: LocationEvent) -> Self {
        match event {
            LocationEvent::Position {
                latitude,
                longitude,
            } => Self {
                location: Some(WireCoordinates {
                    lat: latitude,
                    lng: longitude,
                }),
                error_code: None,
            },
            LocationEvent::Failure { code } => Self {
                location: None,
                error_code: Some(code.0),
            },
        }
    }
}

impl TryFrom<LocationEventWire> for LocationEvent {
    type Error = WireError;

    fn try_from(wire: LocationEventWire) -> Result<Self, WireError> {
        match (wire.location, wire.error_code) {
            (Some(coords), None) => Ok(LocationEvent::Position {
                latitude: coords.lat,
                longitude: coords.lng,
            }),
            (None, Some(code)) => Ok(LocationEvent::Failure {
                code: LocationErrorCode(code),
            }),
            (Some(_), Some(_)) => Err(WireError::BothPresent),
            (None, None) => Err(WireError::BothAbsent),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
