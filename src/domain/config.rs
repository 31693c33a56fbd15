//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for all runtime settings.
//! It can be constructed from CLI arguments (preferred for production) or from
//! sensible defaults (useful for local development and tests).
//!
//! # Design rationale
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads inside the domain) makes the bridge easy to embed in tests
//! and in the hosting UI runtime.  The binary entry point is responsible for
//! populating the struct from CLI args or environment variables.

/// All runtime configuration for the capability bridge.
///
/// Build this struct once at startup (via CLI args or defaults), then hand it
/// to [`Bridge::start`](crate::infrastructure::bridge::Bridge).  The bridge
/// never mutates it.
///
/// # The API key
///
/// The `api_key` is consumed from the environment at startup and passed
/// through *unchanged* to the UI in its initialization payload.  The bridge
/// itself never uses it — the UI runtime needs it for its own address-lookup
/// calls.
///
/// # Example
///
/// ```rust
/// use w3w_host_bridge::domain::BridgeConfig;
///
/// // Defaults are suitable for local development and tests:
/// let cfg = BridgeConfig::default();
/// assert_eq!(cfg.share_url_base, "https://w3w.co/");
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// what3words API key, passed through to the UI in the init payload.
    pub api_key: String,

    /// Title used for every native share sheet invocation.
    pub share_title: String,

    /// Text placed before the three-word address in the share body.
    ///
    /// The share body is `"{share_body_prefix}{address}"`.
    pub share_body_prefix: String,

    /// Base URL the three-word address is appended to for the share link.
    ///
    /// Must end with the separator the address should follow (here a `/`):
    /// the share URL is `"{share_url_base}{address}"`.
    pub share_url_base: String,

    /// Capacity of each bounded UI port channel (requests, notices,
    /// locations).
    ///
    /// Location events are forwarded one at a time in callback order, so this
    /// only needs to absorb short bursts while the UI is busy.
    pub channel_capacity: usize,
}

impl Default for BridgeConfig {
    /// Returns a `BridgeConfig` with the share templates the w3w-encounter UI
    /// expects and an empty API key.
    ///
    /// | Field             | Default                          |
    /// |-------------------|----------------------------------|
    /// | api_key           | `""`                             |
    /// | share_title       | `"w3w-encounter"`                |
    /// | share_body_prefix | `"わたしはいまここにいます: "`   |
    /// | share_url_base    | `"https://w3w.co/"`              |
    /// | channel_capacity  | 32                               |
    fn default() -> Self {
        Self {
            api_key: String::new(),
            share_title: "w3w-encounter".to_string(),
            share_body_prefix: "わたしはいまここにいます: ".to_string(),
            share_url_base: "https://w3w.co/".to_string(),
            channel_capacity: 32,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
