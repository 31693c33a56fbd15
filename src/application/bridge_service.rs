//! Core translation logic.
//!
//! This module provides pure functions that translate between the two
//! boundaries the bridge sits between:
//!
//! - **Host side**: raw call results and watch callbacks
//!   ([`HostRejection`] / [`HostWatchEvent`])
//! - **UI side**: port messages ([`UiNotice`] / [`LocationEvent`])
//!
//! The functions here have no I/O side effects and no dependencies on async
//! runtimes, channels, or tasks.  This makes them easy to unit test in
//! isolation.
//!
//! # Translation directions
//!
//! ```text
//! UI → Host:   three-word address → ShareRequest     call: build_share_request()
//! Host → UI:   clipboard result   → UiNotice         call: clipboard_notice()
//!              share result       → UiNotice         call: share_notice()
//!              watch callback     → LocationEvent    call: normalize_watch_event()
//! ```

use crate::domain::config::BridgeConfig;
use crate::domain::host::{HostRejection, HostWatchEvent, ShareRequest};
use crate::domain::messages::{LocationErrorCode, LocationEvent, UiNotice};

// ── UI → Host: share payload derivation ──────────────────────────────────────

/// Derives the structured share payload for a three-word address.
///
/// The UI sends only the address; title, body, and URL are assembled here
/// from the configured templates immediately before dispatch.  The result is
/// moved into the host call and not retained.
///
/// # Example
///
/// ```rust
/// use w3w_host_bridge::application::build_share_request;
/// use w3w_host_bridge::domain::BridgeConfig;
///
/// let req = build_share_request("apple.banana.cherry", &BridgeConfig::default());
/// assert_eq!(req.url, "https://w3w.co/apple.banana.cherry");
/// ```
pub fn build_share_request(address: &str, config: &BridgeConfig) -> ShareRequest {
    ShareRequest {
        title: config.share_title.clone(),
        body: format!("{}{}", config.share_body_prefix, address),
        url: format!("{}{}", config.share_url_base, address),
    }
}

// ── Host → UI: call result translation ────────────────────────────────────────

/// Translates the result of a host clipboard write into the one notice the
/// UI receives for that request.
pub fn clipboard_notice(result: Result<(), HostRejection>) -> UiNotice {
    match result {
        Ok(()) => UiNotice::ClipboardWriteSucceeded,
        Err(rejection) => UiNotice::ClipboardWriteFailed {
            reason: rejection.reason,
        },
    }
}

/// Translates the result of a host share call into the one notice the UI
/// receives for that request.
pub fn share_notice(result: Result<(), HostRejection>) -> UiNotice {
    match result {
        Ok(()) => UiNotice::ShareSucceeded,
        Err(rejection) => UiNotice::ShareFailed {
            reason: rejection.reason,
        },
    }
}

// ── Host → UI: watch callback normalization ──────────────────────────────────

/// Normalizes one host watch callback into a [`LocationEvent`].
///
/// This is the *single* emission point for location events: both the success
/// and the error callback of the host watch flow through here, so the
/// mutual-exclusivity invariant of [`LocationEvent`] cannot be violated by a
/// divergent second code path.  One callback in, one event out — cardinality
/// and order are preserved by the forwarding loop that calls this function.
pub fn normalize_watch_event(event: HostWatchEvent) -> LocationEvent {
    match event {
        HostWatchEvent::Position(position) => LocationEvent::Position {
            latitude: position.latitude,
            longitude: position.longitude,
        },
        HostWatchEvent::Error(code) => LocationEvent::Failure {
            code: LocationErrorCode(code),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::host::HostPosition;

    // ── build_share_request ───────────────────────────────────────────────────

    #[test]
    fn test_share_request_title_comes_from_config() {
        // Arrange
        let config = BridgeConfig::default();

        // Act
        let req = build_share_request("apple.banana.cherry", &config);

        // Assert
        assert_eq!(req.title, "w3w-encounter");
    }

    #[test]
    fn test_share_request_body_is_prefix_plus_address() {
        let config = BridgeConfig {
            share_body_prefix: "I am here: ".to_string(),
            ..BridgeConfig::default()
        };
        let req = build_share_request("filled.count.soap", &config);
        assert_eq!(req.body, "I am here: filled.count.soap");
    }

    #[test]
    fn test_share_request_url_appends_address_to_base() {
        let config = BridgeConfig::default();
        let req = build_share_request("apple.banana.cherry", &config);
        assert_eq!(req.url, "https://w3w.co/apple.banana.cherry");
    }

    #[test]
    fn test_share_request_default_body_uses_japanese_prefix() {
        // The default template matches what the original UI shipped with.
        let req = build_share_request("x.y.z", &BridgeConfig::default());
        assert_eq!(req.body, "わたしはいまここにいます: x.y.z");
    }

    // ── clipboard_notice / share_notice ───────────────────────────────────────

    #[test]
    fn test_clipboard_success_produces_success_notice() {
        // Arrange / Act
        let notice = clipboard_notice(Ok(()));

        // Assert: success, and only success
        assert_eq!(notice, UiNotice::ClipboardWriteSucceeded);
    }

    #[test]
    fn test_clipboard_rejection_produces_failure_notice_with_reason() {
        let notice = clipboard_notice(Err(HostRejection::new("permission denied")));
        assert_eq!(
            notice,
            UiNotice::ClipboardWriteFailed {
                reason: "permission denied".to_string()
            }
        );
    }

    #[test]
    fn test_share_success_produces_success_notice() {
        let notice = share_notice(Ok(()));
        assert_eq!(notice, UiNotice::ShareSucceeded);
    }

    #[test]
    fn test_share_rejection_carries_host_reason() {
        // The rejection reason must reach the UI verbatim.
        let notice = share_notice(Err(HostRejection::new("share sheet dismissed")));
        assert_eq!(
            notice,
            UiNotice::ShareFailed {
                reason: "share sheet dismissed".to_string()
            }
        );
    }

    // ── normalize_watch_event ─────────────────────────────────────────────────

    #[test]
    fn test_position_callback_becomes_position_event() {
        // Arrange: host success callback with (35.0, 139.0)
        let callback = HostWatchEvent::Position(HostPosition {
            latitude: 35.0,
            longitude: 139.0,
        });

        // Act
        let event = normalize_watch_event(callback);

        // Assert
        assert_eq!(
            event,
            LocationEvent::Position {
                latitude: 35.0,
                longitude: 139.0
            }
        );
    }

    #[test]
    fn test_error_callback_becomes_failure_event() {
        // Arrange: host error callback with code 1 (permission denied)
        let callback = HostWatchEvent::Error(1);

        // Act
        let event = normalize_watch_event(callback);

        // Assert
        assert_eq!(
            event,
            LocationEvent::Failure {
                code: LocationErrorCode::PERMISSION_DENIED
            }
        );
    }

    #[test]
    fn test_unknown_host_error_code_is_forwarded_unchanged() {
        let event = normalize_watch_event(HostWatchEvent::Error(99));
        assert_eq!(
            event,
            LocationEvent::Failure {
                code: LocationErrorCode(99)
            }
        );
    }
}
