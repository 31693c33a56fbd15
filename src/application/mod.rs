//! Application layer for w3w-host-bridge.
//!
//! The application layer orchestrates the business logic: it knows *what* to
//! do, but delegates *how* to do it to the infrastructure layer.
//!
//! # Responsibilities
//!
//! - Deriving the structured share payload from a three-word address
//! - Translating host call results into UI notices
//! - Normalizing host watch callbacks into [`LocationEvent`]s
//!
//! # What does NOT belong here?
//!
//! - Invoking host services (that is infrastructure)
//! - Tokio task spawning or channel plumbing (infrastructure)
//! - Port message type definitions (domain)
//!
//! [`LocationEvent`]: crate::domain::LocationEvent

pub mod bridge_service;

// Re-export so callers can write `application::build_share_request` directly.
pub use bridge_service::{
    build_share_request, clipboard_notice, normalize_watch_event, share_notice,
};
