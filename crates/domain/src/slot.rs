//! Capability slot catalog — the fixed set of optional positions on a device.
//!
//! Every optional sub-component a device can carry lives in one of ten named
//! slots. The catalog is static: configuration decides which slots are
//! present, never what a slot is.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capability::{MeasurementClass, Unit};

/// The option set shared by both swing selectors. Fixed; user configuration
/// cannot redefine it.
pub const SWING_OPTIONS: &[&str] = &["auto", "fixed"];

/// The ten fixed capability slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    HorizontalSwingSelect,
    VerticalSwingSelect,
    OutsideTemperature,
    InsideTemperature,
    CurrentPowerConsumption,
    NanoexSwitch,
    EcoSwitch,
    EconaviSwitch,
    MildDrySwitch,
    CurrentTemperatureSensor,
}

/// What a slot holds and which constraints it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Discrete selector with a closed, slot-fixed option set.
    Selector { options: &'static [&'static str] },
    /// Boolean feature switch.
    Toggle,
    /// Measurement sensor owned by the device, unit/class fixed per slot.
    Measurement {
        unit: Unit,
        class: MeasurementClass,
    },
    /// Non-owning reference to a measurement declared elsewhere.
    Reference,
}

impl SlotKind {
    /// Whether instances of this kind get their own managed lifecycle.
    ///
    /// Selectors and toggles are registered as components; measurements are
    /// passive producers and are not.
    #[must_use]
    pub fn needs_component_registration(&self) -> bool {
        matches!(self, Self::Selector { .. } | Self::Toggle)
    }
}

/// Static description of one slot: config key, display defaults, kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotDescriptor {
    pub id: SlotId,
    /// Key under which the slot appears in configuration.
    pub key: &'static str,
    /// Label used when deriving a display name from the device.
    pub label: &'static str,
    /// Icon applied when the configuration does not set one.
    pub default_icon: Option<&'static str>,
    pub kind: SlotKind,
}

/// The full catalog, in composition order: selectors, then owned
/// measurements, then toggles, then the reference measurement. Independent
/// instantiations never depend on one another; the only cross-reference slot
/// resolves last.
pub static DESCRIPTORS: [SlotDescriptor; 10] = [
    SlotDescriptor {
        id: SlotId::HorizontalSwingSelect,
        key: "horizontal_swing_select",
        label: "Horizontal Swing",
        default_icon: Some("mdi:arrow-left-right"),
        kind: SlotKind::Selector {
            options: SWING_OPTIONS,
        },
    },
    SlotDescriptor {
        id: SlotId::VerticalSwingSelect,
        key: "vertical_swing_select",
        label: "Vertical Swing",
        default_icon: Some("mdi:arrow-up-down"),
        kind: SlotKind::Selector {
            options: SWING_OPTIONS,
        },
    },
    SlotDescriptor {
        id: SlotId::OutsideTemperature,
        key: "outside_temperature",
        label: "Outside Temperature",
        default_icon: Some("mdi:thermometer"),
        kind: SlotKind::Measurement {
            unit: Unit::Celsius,
            class: MeasurementClass::Temperature,
        },
    },
    SlotDescriptor {
        id: SlotId::InsideTemperature,
        key: "inside_temperature",
        label: "Inside Temperature",
        default_icon: Some("mdi:thermometer"),
        kind: SlotKind::Measurement {
            unit: Unit::Celsius,
            class: MeasurementClass::Temperature,
        },
    },
    SlotDescriptor {
        id: SlotId::CurrentPowerConsumption,
        key: "current_power_consumption",
        label: "Current Power Consumption",
        default_icon: Some("mdi:flash"),
        kind: SlotKind::Measurement {
            unit: Unit::Watt,
            class: MeasurementClass::Power,
        },
    },
    SlotDescriptor {
        id: SlotId::NanoexSwitch,
        key: "nanoex_switch",
        label: "NanoeX",
        default_icon: Some("mdi:air-filter"),
        kind: SlotKind::Toggle,
    },
    SlotDescriptor {
        id: SlotId::EcoSwitch,
        key: "eco_switch",
        label: "Eco",
        default_icon: Some("mdi:leaf"),
        kind: SlotKind::Toggle,
    },
    SlotDescriptor {
        id: SlotId::EconaviSwitch,
        key: "econavi_switch",
        label: "Econavi",
        default_icon: Some("mdi:leaf-circle"),
        kind: SlotKind::Toggle,
    },
    SlotDescriptor {
        id: SlotId::MildDrySwitch,
        key: "mild_dry_switch",
        label: "Mild Dry",
        default_icon: Some("mdi:water-percent"),
        kind: SlotKind::Toggle,
    },
    SlotDescriptor {
        id: SlotId::CurrentTemperatureSensor,
        key: "current_temperature_sensor",
        label: "Current Temperature",
        default_icon: None,
        kind: SlotKind::Reference,
    },
];

impl SlotId {
    /// All slots, in the fixed composition order of [`DESCRIPTORS`].
    pub const ALL: [SlotId; 10] = [
        SlotId::HorizontalSwingSelect,
        SlotId::VerticalSwingSelect,
        SlotId::OutsideTemperature,
        SlotId::InsideTemperature,
        SlotId::CurrentPowerConsumption,
        SlotId::NanoexSwitch,
        SlotId::EcoSwitch,
        SlotId::EconaviSwitch,
        SlotId::MildDrySwitch,
        SlotId::CurrentTemperatureSensor,
    ];

    /// The static descriptor for this slot.
    #[must_use]
    pub fn descriptor(self) -> &'static SlotDescriptor {
        &DESCRIPTORS[self.index()]
    }

    /// The configuration key for this slot.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    /// Look a slot up by its configuration key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        DESCRIPTORS.iter().find(|d| d.key == key).map(|d| d.id)
    }

    fn index(self) -> usize {
        match self {
            Self::HorizontalSwingSelect => 0,
            Self::VerticalSwingSelect => 1,
            Self::OutsideTemperature => 2,
            Self::InsideTemperature => 3,
            Self::CurrentPowerConsumption => 4,
            Self::NanoexSwitch => 5,
            Self::EcoSwitch => 6,
            Self::EconaviSwitch => 7,
            Self::MildDrySwitch => 8,
            Self::CurrentTemperatureSensor => 9,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
