//! # pacbridge-app
//!
//! Application layer — the composition engine and its **port definitions**.
//!
//! ## Responsibilities
//! - Define **port traits** that the surrounding runtime implements
//!   (driven/outbound ports):
//!   - `ComponentHost` — lifecycle registration for managed components
//!   - `PeerRegistry` — climate-peer and transport-peer registration
//!   - `SensorIndex` — identity lookup for externally declared sensors
//! - Provide the **composition engine** ([`Composer`](composer::Composer)):
//!   consume a validated `DeviceConfig`, instantiate the concrete device and
//!   every present capability, and issue the binding calls in a fixed order
//! - Provide **in-process infrastructure** ([`InProcessRegistry`](registry::InProcessRegistry))
//!   that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `pacbridge-domain` only (plus `tracing` for instrumentation).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod composer;
pub mod ports;
pub mod registry;
