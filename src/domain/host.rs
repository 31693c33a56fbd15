//! Host boundary types.
//!
//! Raw shapes produced and consumed at the host-API boundary: the coordinate
//! pair a geolocation callback delivers, the success-or-error union of one
//! watch callback, the free-form rejection of a clipboard/share call, and the
//! structured payload handed to the native share sheet.
//!
//! These stay separate from the UI port messages in [`messages`](super::messages)
//! on purpose: the host side and the UI side evolve independently, and the
//! application layer is the single place where one is translated into the
//! other.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One successful raw position reading from the host geolocation service.
///
/// The bridge performs no coordinate math; the values pass through to the UI
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostPosition {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// One host geolocation watch callback: either a reading or an error code.
///
/// Host watch APIs use the double-callback style (a success function and an
/// error function).  Modeling both callbacks as one union means the bridge has
/// a single normalization point instead of two duplicated forwarding paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostWatchEvent {
    /// The success callback fired with a position.
    Position(HostPosition),
    /// The error callback fired with a host-defined error code.
    Error(u8),
}

/// A host async call (clipboard write, share) was rejected.
///
/// The reason is host-supplied free-form text, treated opaquely — the bridge
/// forwards it to the UI inside a failure notice and never inspects it.
/// Rejection is always recoverable: it produces a transient notice, never a
/// fatal condition, and never halts future requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host rejected the call: {reason}")]
pub struct HostRejection {
    /// Host-supplied rejection reason.
    pub reason: String,
}

impl HostRejection {
    /// Convenience constructor for a rejection with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The structured payload handed to the native share sheet.
///
/// Built from a three-word address and the configured templates immediately
/// before dispatch, then moved into the host call — never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    /// Share sheet title.
    pub title: String,
    /// Share sheet body text (prefix + address).
    pub body: String,
    /// Link to the shared location.
    pub url: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
