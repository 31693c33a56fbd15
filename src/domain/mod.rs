//! Domain layer for w3w-host-bridge.
//!
//! The domain layer contains pure business-logic types that have no
//! dependencies on I/O, async runtimes, or external frameworks.  This makes
//! them easy to test in isolation and portable to any runtime or platform.
//!
//! # What belongs in the domain layer?
//!
//! - Port message types (the JSON "language" between UI and bridge)
//! - Host boundary types (the raw shapes host callbacks produce)
//! - Configuration structures
//! - Error types that describe business-logic failures
//!
//! # What does NOT belong here?
//!
//! - Any `tokio` channel or task types
//! - Environment variable reading or CLI parsing
//! - Anything that could block or fail due to external state

pub mod config;
pub mod host;
pub mod messages;

// Re-export the most commonly needed types at the domain module boundary
// so callers can write `domain::BridgeConfig` instead of the longer path.
pub use config::BridgeConfig;
pub use host::{HostPosition, HostRejection, HostWatchEvent, ShareRequest};
pub use messages::{
    CapabilityFlags, InitPayload, LocationErrorCode, LocationEvent, UiNotice, UiRequest,
};
