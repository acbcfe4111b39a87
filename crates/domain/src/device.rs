//! Device instance — the composed runtime object.
//!
//! A [`DeviceInstance`] is the base device (one of two concrete kinds) plus a
//! binding per present capability slot. Wiring happens exactly once, during
//! composition; afterwards the bindings are read-only. Runtime field values
//! (temperatures, switch states) mutate in the protocol layer, not here.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::capability::{Capability, DisplayMeta, FeatureSwitch, MeasurementSensor, SwingSelect};
use crate::error::ConstructionError;
use crate::id::{DeviceId, Handle};
use crate::slot::SlotId;
use crate::variant::Variant;

/// The concrete device implementation selected by the configuration's
/// `variant` discriminant. Two disjoint implementations share one base
/// contract; the choice is made once, at composition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Cnt,
    Wlan,
}

impl From<Variant> for DeviceKind {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Cnt => Self::Cnt,
            Variant::Wlan => Self::Wlan,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cnt => f.write_str("cnt"),
            Self::Wlan => f.write_str("wlan"),
        }
    }
}

/// What a binding call attaches to a slot.
#[derive(Debug, Clone)]
pub enum Bound {
    /// A capability created for, and exclusively owned by, this device.
    Owned(Capability),
    /// A non-owning reference to a sensor declared elsewhere. Its lifetime
    /// is governed by the declaring context, not by this device.
    Reference(Arc<MeasurementSensor>),
}

/// One dedicated field per slot, each written at most once.
#[derive(Debug, Clone, Default)]
struct Bindings {
    horizontal_swing_select: Option<SwingSelect>,
    vertical_swing_select: Option<SwingSelect>,
    outside_temperature: Option<MeasurementSensor>,
    inside_temperature: Option<MeasurementSensor>,
    current_power_consumption: Option<MeasurementSensor>,
    nanoex_switch: Option<FeatureSwitch>,
    eco_switch: Option<FeatureSwitch>,
    econavi_switch: Option<FeatureSwitch>,
    mild_dry_switch: Option<FeatureSwitch>,
    current_temperature_sensor: Option<Arc<MeasurementSensor>>,
}

/// The composed runtime object: base device plus bound capabilities.
#[derive(Debug, Clone)]
pub struct DeviceInstance {
    pub id: DeviceId,
    pub kind: DeviceKind,
    pub handle: Handle,
    pub meta: DisplayMeta,
    bindings: Bindings,
}

impl DeviceInstance {
    /// Create an unwired device of the given kind. A fresh [`DeviceId`] is
    /// generated; the handle and metadata come from the configuration.
    #[must_use]
    pub fn new(kind: DeviceKind, handle: Handle, meta: DisplayMeta) -> Self {
        Self {
            id: DeviceId::new(),
            kind,
            handle,
            meta,
            bindings: Bindings::default(),
        }
    }

    /// Display name, falling back to the declaration handle.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.meta.name.as_deref().unwrap_or(self.handle.as_str())
    }

    /// Attach a capability to its slot. The single binding call per slot.
    ///
    /// Dispatch from slot to field is a static match; there is no
    /// string-keyed setter lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::SlotAlreadyBound`] when the slot already
    /// holds an instance, or [`ConstructionError::SlotKindMismatch`] when the
    /// bound value's kind does not fit the slot.
    pub fn bind(&mut self, slot: SlotId, bound: Bound) -> Result<(), ConstructionError> {
        if self.is_bound(slot) {
            return Err(ConstructionError::SlotAlreadyBound(slot));
        }
        let mismatch = ConstructionError::SlotKindMismatch(slot);
        let b = &mut self.bindings;
        match (slot, bound) {
            (SlotId::HorizontalSwingSelect, Bound::Owned(Capability::Select(v))) => {
                b.horizontal_swing_select = Some(v);
            }
            (SlotId::VerticalSwingSelect, Bound::Owned(Capability::Select(v))) => {
                b.vertical_swing_select = Some(v);
            }
            (SlotId::OutsideTemperature, Bound::Owned(Capability::Sensor(v))) => {
                b.outside_temperature = Some(v);
            }
            (SlotId::InsideTemperature, Bound::Owned(Capability::Sensor(v))) => {
                b.inside_temperature = Some(v);
            }
            (SlotId::CurrentPowerConsumption, Bound::Owned(Capability::Sensor(v))) => {
                b.current_power_consumption = Some(v);
            }
            (SlotId::NanoexSwitch, Bound::Owned(Capability::Switch(v))) => {
                b.nanoex_switch = Some(v);
            }
            (SlotId::EcoSwitch, Bound::Owned(Capability::Switch(v))) => {
                b.eco_switch = Some(v);
            }
            (SlotId::EconaviSwitch, Bound::Owned(Capability::Switch(v))) => {
                b.econavi_switch = Some(v);
            }
            (SlotId::MildDrySwitch, Bound::Owned(Capability::Switch(v))) => {
                b.mild_dry_switch = Some(v);
            }
            (SlotId::CurrentTemperatureSensor, Bound::Reference(v)) => {
                b.current_temperature_sensor = Some(v);
            }
            _ => return Err(mismatch),
        }
        Ok(())
    }

    /// Whether the slot holds a binding.
    #[must_use]
    pub fn is_bound(&self, slot: SlotId) -> bool {
        let b = &self.bindings;
        match slot {
            SlotId::HorizontalSwingSelect => b.horizontal_swing_select.is_some(),
            SlotId::VerticalSwingSelect => b.vertical_swing_select.is_some(),
            SlotId::OutsideTemperature => b.outside_temperature.is_some(),
            SlotId::InsideTemperature => b.inside_temperature.is_some(),
            SlotId::CurrentPowerConsumption => b.current_power_consumption.is_some(),
            SlotId::NanoexSwitch => b.nanoex_switch.is_some(),
            SlotId::EcoSwitch => b.eco_switch.is_some(),
            SlotId::EconaviSwitch => b.econavi_switch.is_some(),
            SlotId::MildDrySwitch => b.mild_dry_switch.is_some(),
            SlotId::CurrentTemperatureSensor => b.current_temperature_sensor.is_some(),
        }
    }

    /// Number of bound slots.
    #[must_use]
    pub fn bound_count(&self) -> usize {
        SlotId::ALL.iter().filter(|s| self.is_bound(**s)).count()
    }

    /// The bound slots, in composition order.
    #[must_use]
    pub fn bound_slots(&self) -> Vec<SlotId> {
        SlotId::ALL
            .into_iter()
            .filter(|s| self.is_bound(*s))
            .collect()
    }

    #[must_use]
    pub fn horizontal_swing_select(&self) -> Option<&SwingSelect> {
        self.bindings.horizontal_swing_select.as_ref()
    }

    #[must_use]
    pub fn vertical_swing_select(&self) -> Option<&SwingSelect> {
        self.bindings.vertical_swing_select.as_ref()
    }

    #[must_use]
    pub fn outside_temperature(&self) -> Option<&MeasurementSensor> {
        self.bindings.outside_temperature.as_ref()
    }

    #[must_use]
    pub fn inside_temperature(&self) -> Option<&MeasurementSensor> {
        self.bindings.inside_temperature.as_ref()
    }

    #[must_use]
    pub fn current_power_consumption(&self) -> Option<&MeasurementSensor> {
        self.bindings.current_power_consumption.as_ref()
    }

    #[must_use]
    pub fn nanoex_switch(&self) -> Option<&FeatureSwitch> {
        self.bindings.nanoex_switch.as_ref()
    }

    #[must_use]
    pub fn eco_switch(&self) -> Option<&FeatureSwitch> {
        self.bindings.eco_switch.as_ref()
    }

    #[must_use]
    pub fn econavi_switch(&self) -> Option<&FeatureSwitch> {
        self.bindings.econavi_switch.as_ref()
    }

    #[must_use]
    pub fn mild_dry_switch(&self) -> Option<&FeatureSwitch> {
        self.bindings.mild_dry_switch.as_ref()
    }

    #[must_use]
    pub fn current_temperature_sensor(&self) -> Option<&Arc<MeasurementSensor>> {
        self.bindings.current_temperature_sensor.as_ref()
    }
}
