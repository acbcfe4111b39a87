//! # pacbridge-domain
//!
//! Pure domain model for the pacbridge climate bridge.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, display metadata
//! - Define the **capability slot catalog** (two swing selectors, four feature
//!   switches, four measurement slots) and its fixed constraints
//! - Define the **protocol variants** (CNT and WLAN) and the concrete device
//!   kind each one selects
//! - Define **capability instances** (selects, switches, sensors) and the
//!   composed [`DeviceInstance`](device::DeviceInstance) they are wired onto
//! - Validate raw configuration trees into a typed [`DeviceConfig`](config::DeviceConfig)
//! - Contain all invariant enforcement (fixed option sets, bind-exactly-once)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All runtime boundaries are expressed as traits in the `app` crate (ports).

pub mod capability;
pub mod config;
pub mod device;
pub mod error;
pub mod id;
pub mod schema;
pub mod slot;
pub mod variant;
