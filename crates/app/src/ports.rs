//! Port definitions — traits the surrounding runtime implements.
//!
//! Ports are the boundaries between the composition engine and the excluded
//! transport/runtime layer. They are defined here (in `app`) so that both the
//! engine and the runtime adapters can depend on them without creating
//! circular dependencies. All calls are synchronous: composition happens
//! once, at startup, before the runtime's event-driven phase begins.

use std::sync::Arc;

use pacbridge_domain::capability::MeasurementSensor;
use pacbridge_domain::device::DeviceKind;
use pacbridge_domain::error::ConstructionError;
use pacbridge_domain::id::{CapabilityId, DeviceId, Handle};
use pacbridge_domain::slot::SlotId;

/// An object handed to the runtime for lifecycle management (init/teardown
/// is the runtime's concern, not the engine's).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagedComponent {
    /// The base device itself.
    Device { id: DeviceId, kind: DeviceKind },
    /// A capability with its own independent lifecycle (selectors and
    /// toggles; measurements are passive and never registered).
    Capability { id: CapabilityId, slot: SlotId },
}

/// Lifecycle registration for managed components.
pub trait ComponentHost {
    /// Register a component with the runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when the runtime refuses the component;
    /// the engine aborts the whole composition in that case.
    fn register_component(&mut self, component: ManagedComponent)
    -> Result<(), ConstructionError>;
}

/// Peer registration with the climate front-end and the transport layer.
pub trait PeerRegistry {
    /// Register the device as the climate-facing peer.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when the collaborator refuses the peer.
    fn register_climate_peer(&mut self, device: DeviceId) -> Result<(), ConstructionError>;

    /// Register the device as the transport-owning (UART) peer.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when the collaborator refuses the peer.
    fn register_transport_peer(&mut self, device: DeviceId) -> Result<(), ConstructionError>;
}

/// Identity lookup for sensors declared outside the device configuration.
///
/// Used only by the reference-measurement slot. A hit is a non-owning,
/// shared reference: the declaring context keeps its own strong handle.
pub trait SensorIndex {
    /// Resolve a previously declared sensor by its identity handle.
    fn resolve(&self, handle: &Handle) -> Option<Arc<MeasurementSensor>>;
}
