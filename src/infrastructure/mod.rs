//! Infrastructure layer for w3w-host-bridge.
//!
//! The infrastructure layer owns everything that touches an async runtime or
//! an external service: the host service traits and their implementations,
//! the typed channel pair shared with the UI runtime, and the bridge runtime
//! that wires them together.
//!
//! # Responsibilities
//!
//! - Defining the host service boundary (`ClipboardHost`, `ShareHost`,
//!   `GeolocationHost`) and probing which services exist
//! - Creating the typed UI ports (init, requests, notices, locations)
//! - Spawning the dispatch and location-forwarding tasks
//! - Explicit teardown via [`bridge::BridgeHandle::shutdown`]
//!
//! # What does NOT belong here?
//!
//! - Translation logic (that is the application layer)
//! - Message type definitions (that is the domain layer)
//! - CLI parsing (that is done in `main.rs`)

pub mod bridge;
pub mod host;
pub mod mock;
pub mod sim;
pub mod ui_port;

// Re-export the primary entry points so callers can reach them concisely.
pub use bridge::{Bridge, BridgeHandle};
pub use host::HostServices;
pub use ui_port::{ui_channel, UiHandle, UiPorts};
