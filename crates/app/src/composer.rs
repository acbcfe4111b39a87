//! Composition engine — turns a validated configuration into a wired device.
//!
//! `compose` is all-or-nothing: any instantiation, registration, or
//! resolution failure aborts the whole composition and no partially wired
//! device escapes. It runs once, synchronously, at startup; re-invoking it
//! with the same configuration produces a second, independent device graph.

use pacbridge_domain::capability::{
    Capability, DisplayMeta, FeatureSwitch, MeasurementSensor, SwingSelect,
};
use pacbridge_domain::config::{DeviceConfig, SlotEntry};
use pacbridge_domain::device::{Bound, DeviceInstance, DeviceKind};
use pacbridge_domain::error::{PacError, UnresolvedReferenceError};
use pacbridge_domain::id::{CapabilityId, Handle};
use pacbridge_domain::slot::{SlotDescriptor, SlotId, SlotKind};

use crate::ports::{ComponentHost, ManagedComponent, PeerRegistry, SensorIndex};

/// Display name used when the configuration names neither device nor handle.
const DEFAULT_DEVICE_NAME: &str = "Panasonic AC";

/// The composition engine, generic over the runtime registry it wires
/// against (constructor injection).
pub struct Composer<R> {
    registry: R,
}

impl<R> Composer<R>
where
    R: ComponentHost + PeerRegistry + SensorIndex,
{
    /// Create an engine backed by the given registry.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Borrow the backing registry (e.g. to inspect registrations).
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Consume the engine and return the backing registry.
    pub fn into_registry(self) -> R {
        self.registry
    }

    /// Compose a device from a validated configuration.
    ///
    /// Instantiates the concrete device for the configured variant,
    /// registers it with its collaborators, then walks the ten capability
    /// slots in the catalog's fixed order — selectors, owned measurements,
    /// toggles, and the reference measurement last — instantiating and
    /// binding each present one. Absent slots cost nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PacError::UnresolvedReference`] when the reference slot
    /// names an undeclared sensor, or [`PacError::Construction`] when a
    /// collaborator refuses a registration or a slot is wired twice. Every
    /// error aborts the whole composition.
    #[tracing::instrument(skip(self, config), fields(variant = %config.variant))]
    pub fn compose(&mut self, config: DeviceConfig) -> Result<DeviceInstance, PacError> {
        let kind = DeviceKind::from(config.variant);
        let handle = config
            .handle
            .clone()
            .unwrap_or_else(|| Handle::new(format!("panasonic_ac_{kind}")));
        let mut meta = config.meta.clone();
        if meta.name.is_none() {
            meta.name = Some(DEFAULT_DEVICE_NAME.to_string());
        }
        let mut device = DeviceInstance::new(kind, handle, meta);

        self.registry.register_component(ManagedComponent::Device {
            id: device.id,
            kind,
        })?;
        self.registry.register_climate_peer(device.id)?;
        self.registry.register_transport_peer(device.id)?;
        tracing::debug!(device = %device.handle, %kind, "base device registered");

        for slot in SlotId::ALL {
            self.wire_slot(&mut device, &config, slot)?;
        }

        tracing::info!(
            device = %device.handle,
            bound = device.bound_count(),
            "device composed"
        );
        Ok(device)
    }

    fn wire_slot(
        &mut self,
        device: &mut DeviceInstance,
        config: &DeviceConfig,
        slot: SlotId,
    ) -> Result<(), PacError> {
        let descriptor = slot.descriptor();

        // The reference slot resolves an existing declaration instead of
        // instantiating anything.
        if descriptor.kind == SlotKind::Reference {
            let Some(handle) = config.current_temperature_sensor.as_ref() else {
                return Ok(());
            };
            let sensor =
                self.registry
                    .resolve(handle)
                    .ok_or_else(|| UnresolvedReferenceError {
                        handle: handle.clone(),
                    })?;
            device.bind(slot, Bound::Reference(sensor))?;
            tracing::debug!(%slot, "reference resolved and bound");
            return Ok(());
        }

        let Some(entry) = config.entry(slot) else {
            return Ok(());
        };
        let (handle, meta) = slot_identity(device, descriptor, entry);
        let id = CapabilityId::new();
        let capability = match descriptor.kind {
            SlotKind::Selector { options } => Capability::Select(SwingSelect {
                id,
                handle,
                meta,
                options,
            }),
            SlotKind::Toggle => Capability::Switch(FeatureSwitch { id, handle, meta }),
            // Passive producer: bound, but never lifecycle-managed.
            SlotKind::Measurement { unit, class } => Capability::Sensor(MeasurementSensor {
                id,
                handle,
                meta,
                unit,
                class,
            }),
            // Handled above; only block slots reach this point.
            SlotKind::Reference => return Ok(()),
        };

        if descriptor.kind.needs_component_registration() {
            self.registry
                .register_component(ManagedComponent::Capability { id, slot })?;
        }
        device.bind(slot, Bound::Owned(capability))?;
        tracing::debug!(%slot, "capability bound");
        Ok(())
    }
}

/// Identity and display metadata for a present slot: user-supplied values
/// win; the rest derives from the device identity and the slot catalog.
fn slot_identity(
    device: &DeviceInstance,
    descriptor: &SlotDescriptor,
    entry: &SlotEntry,
) -> (Handle, DisplayMeta) {
    let handle = entry
        .handle
        .clone()
        .unwrap_or_else(|| Handle::new(format!("{}_{}", device.handle, descriptor.key)));
    let mut meta = entry.meta.clone();
    if meta.name.is_none() {
        meta.name = Some(format!("{} {}", device.display_name(), descriptor.label));
    }
    if meta.icon.is_none() {
        meta.icon = descriptor.default_icon.map(str::to_owned);
    }
    (handle, meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pacbridge_domain::capability::{MeasurementClass, Unit};
    use pacbridge_domain::error::ConstructionError;
    use pacbridge_domain::id::DeviceId;
    use pacbridge_domain::slot::SWING_OPTIONS;
    use pacbridge_domain::variant::Variant;

    use crate::registry::InProcessRegistry;

    fn external_sensor(handle: &str) -> MeasurementSensor {
        MeasurementSensor {
            id: CapabilityId::new(),
            handle: Handle::new(handle),
            meta: DisplayMeta::default(),
            unit: Unit::Celsius,
            class: MeasurementClass::Temperature,
        }
    }

    fn full_config() -> DeviceConfig {
        let mut config = DeviceConfig::new(Variant::Wlan);
        config.horizontal_swing_select = Some(SlotEntry::default());
        config.vertical_swing_select = Some(SlotEntry::default());
        config.outside_temperature = Some(SlotEntry::default());
        config.inside_temperature = Some(SlotEntry::default());
        config.current_power_consumption = Some(SlotEntry::default());
        config.nanoex_switch = Some(SlotEntry::default());
        config.eco_switch = Some(SlotEntry::default());
        config.econavi_switch = Some(SlotEntry::default());
        config.mild_dry_switch = Some(SlotEntry::default());
        config.current_temperature_sensor = Some(Handle::new("ext_temp"));
        config
    }

    #[test]
    fn should_compose_cnt_device_with_zero_capabilities() {
        // Scenario: `{variant = "cnt"}` and nothing else.
        let mut composer = Composer::new(InProcessRegistry::new());
        let device = composer.compose(DeviceConfig::new(Variant::Cnt)).unwrap();

        assert_eq!(device.kind, DeviceKind::Cnt);
        assert_eq!(device.bound_count(), 0);

        let registry = composer.registry();
        assert_eq!(registry.components().len(), 1);
        assert_eq!(registry.climate_peers(), [device.id]);
        assert_eq!(registry.transport_peers(), [device.id]);
    }

    #[test]
    fn should_compose_wlan_device_with_exactly_two_capabilities() {
        // Scenario: `{variant = "wlan", eco_switch = {}, outside_temperature = {}}`.
        let mut config = DeviceConfig::new(Variant::Wlan);
        config.eco_switch = Some(SlotEntry::default());
        config.outside_temperature = Some(SlotEntry::default());

        let mut composer = Composer::new(InProcessRegistry::new());
        let device = composer.compose(config).unwrap();

        assert_eq!(device.kind, DeviceKind::Wlan);
        assert_eq!(device.bound_count(), 2);
        assert!(device.eco_switch().is_some());
        assert!(device.outside_temperature().is_some());
        assert!(device.nanoex_switch().is_none());
        assert!(device.horizontal_swing_select().is_none());
        assert!(device.current_temperature_sensor().is_none());
    }

    #[test]
    fn should_skip_absent_slots_entirely() {
        let mut composer = Composer::new(InProcessRegistry::new());
        let device = composer.compose(DeviceConfig::new(Variant::Cnt)).unwrap();

        for slot in SlotId::ALL {
            assert!(!device.is_bound(slot));
        }
        // Only the device itself was ever registered.
        assert_eq!(composer.registry().components().len(), 1);
    }

    #[test]
    fn should_bind_every_present_slot_exactly_once() {
        let mut registry = InProcessRegistry::new();
        registry.declare_sensor(external_sensor("ext_temp"));

        let mut composer = Composer::new(registry);
        let device = composer.compose(full_config()).unwrap();

        assert_eq!(device.bound_count(), 10);
        for slot in SlotId::ALL {
            assert!(device.is_bound(slot));
        }
    }

    #[test]
    fn should_register_device_selectors_and_toggles_as_components() {
        let mut registry = InProcessRegistry::new();
        registry.declare_sensor(external_sensor("ext_temp"));

        let mut composer = Composer::new(registry);
        let device = composer.compose(full_config()).unwrap();

        // 1 device + 2 selectors + 4 toggles; measurements are passive.
        let components = composer.registry().components();
        assert_eq!(components.len(), 7);
        assert_eq!(
            components[0],
            ManagedComponent::Device {
                id: device.id,
                kind: DeviceKind::Wlan,
            }
        );
        let capability_slots: Vec<_> = components[1..]
            .iter()
            .map(|c| match c {
                ManagedComponent::Capability { slot, .. } => *slot,
                ManagedComponent::Device { .. } => panic!("device registered twice"),
            })
            .collect();
        assert_eq!(
            capability_slots,
            [
                SlotId::HorizontalSwingSelect,
                SlotId::VerticalSwingSelect,
                SlotId::NanoexSwitch,
                SlotId::EcoSwitch,
                SlotId::EconaviSwitch,
                SlotId::MildDrySwitch,
            ]
        );
    }

    #[test]
    fn should_not_register_measurements_as_components() {
        let mut config = DeviceConfig::new(Variant::Cnt);
        config.outside_temperature = Some(SlotEntry::default());
        config.inside_temperature = Some(SlotEntry::default());
        config.current_power_consumption = Some(SlotEntry::default());

        let mut composer = Composer::new(InProcessRegistry::new());
        let device = composer.compose(config).unwrap();

        assert_eq!(device.bound_count(), 3);
        assert_eq!(composer.registry().components().len(), 1);
    }

    #[test]
    fn should_apply_fixed_options_to_selectors() {
        let mut config = DeviceConfig::new(Variant::Cnt);
        config.horizontal_swing_select = Some(SlotEntry::default());
        config.vertical_swing_select = Some(SlotEntry::default());

        let mut composer = Composer::new(InProcessRegistry::new());
        let device = composer.compose(config).unwrap();

        assert_eq!(
            device.horizontal_swing_select().unwrap().options,
            SWING_OPTIONS
        );
        assert_eq!(
            device.vertical_swing_select().unwrap().options,
            SWING_OPTIONS
        );
    }

    #[test]
    fn should_apply_fixed_unit_and_class_to_measurements() {
        let mut config = DeviceConfig::new(Variant::Cnt);
        config.inside_temperature = Some(SlotEntry::default());
        config.current_power_consumption = Some(SlotEntry::default());

        let mut composer = Composer::new(InProcessRegistry::new());
        let device = composer.compose(config).unwrap();

        let temp = device.inside_temperature().unwrap();
        assert_eq!(temp.unit, Unit::Celsius);
        assert_eq!(temp.class, MeasurementClass::Temperature);

        let power = device.current_power_consumption().unwrap();
        assert_eq!(power.unit, Unit::Watt);
        assert_eq!(power.class, MeasurementClass::Power);
    }

    #[test]
    fn should_fail_with_unresolved_reference_when_handle_not_declared() {
        // Scenario: reference slot names an identity nobody declared.
        let mut config = DeviceConfig::new(Variant::Cnt);
        config.current_temperature_sensor = Some(Handle::new("ghost"));

        let mut composer = Composer::new(InProcessRegistry::new());
        let err = composer.compose(config).unwrap_err();

        let PacError::UnresolvedReference(inner) = err else {
            panic!("expected UnresolvedReference, got {err:?}");
        };
        assert_eq!(inner.handle, Handle::new("ghost"));
    }

    #[test]
    fn should_resolve_reference_declared_before_composition() {
        let mut registry = InProcessRegistry::new();
        registry.declare_sensor(external_sensor("ext_temp"));

        let mut config = DeviceConfig::new(Variant::Wlan);
        config.current_temperature_sensor = Some(Handle::new("ext_temp"));

        let mut composer = Composer::new(registry);
        let device = composer.compose(config).unwrap();

        let bound = device.current_temperature_sensor().unwrap();
        let declared = composer
            .registry()
            .resolve(&Handle::new("ext_temp"))
            .unwrap();
        assert!(Arc::ptr_eq(bound, &declared));
    }

    #[test]
    fn should_derive_capability_name_and_icon_from_device() {
        let mut config = DeviceConfig::new(Variant::Cnt);
        config.meta.name = Some("Living Room AC".to_string());
        config.eco_switch = Some(SlotEntry::default());

        let mut composer = Composer::new(InProcessRegistry::new());
        let device = composer.compose(config).unwrap();

        let eco = device.eco_switch().unwrap();
        assert_eq!(eco.meta.name.as_deref(), Some("Living Room AC Eco"));
        assert_eq!(eco.meta.icon.as_deref(), Some("mdi:leaf"));
    }

    #[test]
    fn should_prefer_user_supplied_identity_and_metadata() {
        let mut config = DeviceConfig::new(Variant::Cnt);
        config.handle = Some(Handle::new("bedroom_ac"));
        config.nanoex_switch = Some(SlotEntry {
            handle: Some(Handle::new("my_nanoex")),
            meta: DisplayMeta {
                name: Some("Ioniser".to_string()),
                icon: Some("mdi:atom".to_string()),
                ..DisplayMeta::default()
            },
        });
        config.eco_switch = Some(SlotEntry::default());

        let mut composer = Composer::new(InProcessRegistry::new());
        let device = composer.compose(config).unwrap();

        let nanoex = device.nanoex_switch().unwrap();
        assert_eq!(nanoex.handle, Handle::new("my_nanoex"));
        assert_eq!(nanoex.meta.name.as_deref(), Some("Ioniser"));
        assert_eq!(nanoex.meta.icon.as_deref(), Some("mdi:atom"));

        // The unnamed slot derives its identity from the device handle.
        let eco = device.eco_switch().unwrap();
        assert_eq!(eco.handle, Handle::new("bedroom_ac_eco_switch"));
    }

    #[test]
    fn should_wire_shared_slots_identically_when_unrelated_slots_differ() {
        let shared = SlotEntry {
            handle: Some(Handle::new("eco")),
            meta: DisplayMeta {
                name: Some("Eco Mode".to_string()),
                ..DisplayMeta::default()
            },
        };

        let mut first = DeviceConfig::new(Variant::Cnt);
        first.handle = Some(Handle::new("ac"));
        first.eco_switch = Some(shared.clone());

        let mut second = first.clone();
        second.mild_dry_switch = Some(SlotEntry::default());
        second.outside_temperature = Some(SlotEntry::default());

        let a = Composer::new(InProcessRegistry::new())
            .compose(first)
            .unwrap();
        let b = Composer::new(InProcessRegistry::new())
            .compose(second)
            .unwrap();

        let eco_a = a.eco_switch().unwrap();
        let eco_b = b.eco_switch().unwrap();
        assert_eq!(eco_a.handle, eco_b.handle);
        assert_eq!(eco_a.meta, eco_b.meta);
    }

    #[test]
    fn should_produce_independent_graphs_on_reinvocation() {
        let mut config = DeviceConfig::new(Variant::Cnt);
        config.eco_switch = Some(SlotEntry::default());

        let mut composer = Composer::new(InProcessRegistry::new());
        let first = composer.compose(config.clone()).unwrap();
        let second = composer.compose(config).unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(
            first.eco_switch().unwrap().id,
            second.eco_switch().unwrap().id
        );
        // Both graphs registered independently.
        assert_eq!(composer.registry().components().len(), 4);
    }

    // A host that starts refusing registrations after a fixed number of
    // calls, for exercising the all-or-nothing failure policy.
    struct RejectingHost {
        inner: InProcessRegistry,
        accept: usize,
        calls: usize,
    }

    impl ComponentHost for RejectingHost {
        fn register_component(
            &mut self,
            component: ManagedComponent,
        ) -> Result<(), ConstructionError> {
            self.calls += 1;
            if self.calls > self.accept {
                return Err(ConstructionError::Collaborator {
                    collaborator: "component_host",
                    component: format!("{component:?}"),
                });
            }
            self.inner.register_component(component)
        }
    }

    impl PeerRegistry for RejectingHost {
        fn register_climate_peer(&mut self, device: DeviceId) -> Result<(), ConstructionError> {
            self.inner.register_climate_peer(device)
        }

        fn register_transport_peer(
            &mut self,
            device: DeviceId,
        ) -> Result<(), ConstructionError> {
            self.inner.register_transport_peer(device)
        }
    }

    impl SensorIndex for RejectingHost {
        fn resolve(&self, handle: &Handle) -> Option<Arc<MeasurementSensor>> {
            self.inner.resolve(handle)
        }
    }

    #[test]
    fn should_abort_composition_when_collaborator_rejects_registration() {
        let mut config = DeviceConfig::new(Variant::Cnt);
        config.eco_switch = Some(SlotEntry::default());

        // Accept the device registration, refuse the switch.
        let host = RejectingHost {
            inner: InProcessRegistry::new(),
            accept: 1,
            calls: 0,
        };
        let mut composer = Composer::new(host);
        let err = composer.compose(config).unwrap_err();

        assert!(matches!(
            err,
            PacError::Construction(ConstructionError::Collaborator { .. })
        ));
    }
}
