//! In-process registry backing all three ports.
//!
//! Suitable for the single-process startup phase: composition happens once,
//! synchronously, so plain owned collections are enough — no locking, no IO.

use std::collections::HashMap;
use std::sync::Arc;

use pacbridge_domain::capability::MeasurementSensor;
use pacbridge_domain::error::ConstructionError;
use pacbridge_domain::id::{DeviceId, Handle};

use crate::ports::{ComponentHost, ManagedComponent, PeerRegistry, SensorIndex};

/// In-process implementation of [`ComponentHost`], [`PeerRegistry`], and
/// [`SensorIndex`].
///
/// Records every registration so callers (and tests) can inspect exactly
/// what composition wired up.
#[derive(Debug, Default)]
pub struct InProcessRegistry {
    components: Vec<ManagedComponent>,
    climate_peers: Vec<DeviceId>,
    transport_peers: Vec<DeviceId>,
    sensors: HashMap<Handle, Arc<MeasurementSensor>>,
}

impl InProcessRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an externally owned sensor under its identity handle.
    ///
    /// Must happen before composing a device that references the handle —
    /// resolution is ordered, not deferred. Re-declaring a handle replaces
    /// the earlier sensor.
    pub fn declare_sensor(&mut self, sensor: MeasurementSensor) {
        self.sensors.insert(sensor.handle.clone(), Arc::new(sensor));
    }

    /// Components registered so far, in registration order.
    #[must_use]
    pub fn components(&self) -> &[ManagedComponent] {
        &self.components
    }

    /// Devices registered as climate peers.
    #[must_use]
    pub fn climate_peers(&self) -> &[DeviceId] {
        &self.climate_peers
    }

    /// Devices registered as transport peers.
    #[must_use]
    pub fn transport_peers(&self) -> &[DeviceId] {
        &self.transport_peers
    }

    /// Number of externally declared sensors.
    #[must_use]
    pub fn declared_sensor_count(&self) -> usize {
        self.sensors.len()
    }
}

impl ComponentHost for InProcessRegistry {
    fn register_component(
        &mut self,
        component: ManagedComponent,
    ) -> Result<(), ConstructionError> {
        self.components.push(component);
        Ok(())
    }
}

impl PeerRegistry for InProcessRegistry {
    fn register_climate_peer(&mut self, device: DeviceId) -> Result<(), ConstructionError> {
        self.climate_peers.push(device);
        Ok(())
    }

    fn register_transport_peer(&mut self, device: DeviceId) -> Result<(), ConstructionError> {
        self.transport_peers.push(device);
        Ok(())
    }
}

impl SensorIndex for InProcessRegistry {
    fn resolve(&self, handle: &Handle) -> Option<Arc<MeasurementSensor>> {
        self.sensors.get(handle).map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacbridge_domain::capability::{DisplayMeta, MeasurementClass, Unit};
    use pacbridge_domain::id::CapabilityId;

    fn sensor(handle: &str) -> MeasurementSensor {
        MeasurementSensor {
            id: CapabilityId::new(),
            handle: Handle::new(handle),
            meta: DisplayMeta::default(),
            unit: Unit::Celsius,
            class: MeasurementClass::Temperature,
        }
    }

    #[test]
    fn should_resolve_declared_sensor_by_handle() {
        let mut registry = InProcessRegistry::new();
        registry.declare_sensor(sensor("living_room_temp"));

        let resolved = registry.resolve(&Handle::new("living_room_temp"));
        assert!(resolved.is_some());
        assert_eq!(resolved.unwrap().handle.as_str(), "living_room_temp");
    }

    #[test]
    fn should_return_none_for_undeclared_handle() {
        let registry = InProcessRegistry::new();
        assert!(registry.resolve(&Handle::new("missing")).is_none());
    }

    #[test]
    fn should_share_the_same_instance_on_repeated_resolution() {
        let mut registry = InProcessRegistry::new();
        registry.declare_sensor(sensor("t"));

        let a = registry.resolve(&Handle::new("t")).unwrap();
        let b = registry.resolve(&Handle::new("t")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn should_replace_sensor_when_handle_redeclared() {
        let mut registry = InProcessRegistry::new();
        let first = sensor("t");
        let first_id = first.id;
        registry.declare_sensor(first);
        registry.declare_sensor(sensor("t"));

        assert_eq!(registry.declared_sensor_count(), 1);
        let resolved = registry.resolve(&Handle::new("t")).unwrap();
        assert_ne!(resolved.id, first_id);
    }

    #[test]
    fn should_record_registrations_in_order() {
        let mut registry = InProcessRegistry::new();
        let device = DeviceId::new();
        registry
            .register_component(ManagedComponent::Device {
                id: device,
                kind: pacbridge_domain::device::DeviceKind::Cnt,
            })
            .unwrap();
        registry.register_climate_peer(device).unwrap();
        registry.register_transport_peer(device).unwrap();

        assert_eq!(registry.components().len(), 1);
        assert_eq!(registry.climate_peers(), [device]);
        assert_eq!(registry.transport_peers(), [device]);
    }
}
