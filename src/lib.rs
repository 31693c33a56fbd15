//! w3w-host-bridge library crate.
//!
//! This crate is the capability bridge between the w3w-encounter UI runtime
//! and the host-provided browser services: continuous geolocation, clipboard
//! write, and the native share sheet.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! UI runtime (typed message ports)
//!         ↕
//! [w3w-host-bridge]
//!   ├── domain           Pure types: port messages, host boundary types, BridgeConfig
//!   ├── application      Translation: host callbacks/results ↔ UI messages
//!   └── infrastructure
//!         ├── host       Host service traits + capability prober
//!         ├── ui_port    Typed channel pair between bridge and UI
//!         └── bridge     Task wiring: request dispatch, location forwarding
//!         ↕
//! Host services (geolocation watch, clipboard write, share sheet)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async — only serde/thiserror derives.
//! - `application` depends on `domain` only.
//! - `infrastructure` depends on all other layers plus `tokio`.
//!
//! # What the bridge does — and does not — do
//!
//! The bridge probes the host once at startup, reports the resulting
//! capability flags to the UI as its initialization input, and from then on is
//! pure I/O translation: UI requests become host calls, host callbacks become
//! UI events. It performs no geolocation computation and owns no state beyond
//! the capability snapshot and the single active location watch.

/// Domain layer: pure business-logic types (no I/O).
pub mod domain;

/// Application layer: message translation logic.
pub mod application;

/// Infrastructure layer: host service traits, UI ports, and the bridge runtime.
pub mod infrastructure;
