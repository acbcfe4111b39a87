//! Capability instances — the optional sub-components wired onto a device.
//!
//! These are opaque to the composition engine: their runtime behaviour lives
//! in the protocol layer. Here they only carry identity, display metadata,
//! and the slot-fixed options they were instantiated with.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{CapabilityId, Handle};

/// Unit of measurement reported by a sensor capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Celsius,
    Watt,
}

impl Unit {
    /// Symbol as displayed next to a reading.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "\u{b0}C",
            Self::Watt => "W",
        }
    }
}

/// Category of the quantity a sensor capability measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementClass {
    Temperature,
    Power,
}

impl fmt::Display for MeasurementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => f.write_str("temperature"),
            Self::Power => f.write_str("power"),
        }
    }
}

/// Display metadata carried by the device and every capability.
///
/// Pass-through for the front-end layer: the composition engine only fills
/// in defaults, it never interprets these fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayMeta {
    pub name: Option<String>,
    pub icon: Option<String>,
    /// Grouping key for front-end sorting.
    pub group: Option<String>,
    /// Sort weight within the group.
    pub sort_weight: Option<i64>,
}

/// A swing-direction selector with a slot-fixed option set.
#[derive(Debug, Clone)]
pub struct SwingSelect {
    pub id: CapabilityId,
    pub handle: Handle,
    pub meta: DisplayMeta,
    /// Always exactly the slot's fixed option set; never user-defined.
    pub options: &'static [&'static str],
}

/// A boolean feature switch (nanoeX, eco, econavi, mild dry).
#[derive(Debug, Clone)]
pub struct FeatureSwitch {
    pub id: CapabilityId,
    pub handle: Handle,
    pub meta: DisplayMeta,
}

/// A measurement sensor with a slot-fixed unit and class.
#[derive(Debug, Clone)]
pub struct MeasurementSensor {
    pub id: CapabilityId,
    pub handle: Handle,
    pub meta: DisplayMeta,
    pub unit: Unit,
    pub class: MeasurementClass,
}

/// Any capability instance a device can own.
#[derive(Debug, Clone)]
pub enum Capability {
    Select(SwingSelect),
    Switch(FeatureSwitch),
    Sensor(MeasurementSensor),
}

impl Capability {
    /// Runtime id of the wrapped instance.
    #[must_use]
    pub fn id(&self) -> CapabilityId {
        match self {
            Self::Select(s) => s.id,
            Self::Switch(s) => s.id,
            Self::Sensor(s) => s.id,
        }
    }

    /// Declaration identity of the wrapped instance.
    #[must_use]
    pub fn handle(&self) -> &Handle {
        match self {
            Self::Select(s) => &s.handle,
            Self::Switch(s) => &s.handle,
            Self::Sensor(s) => &s.handle,
        }
    }

    /// Display metadata of the wrapped instance.
    #[must_use]
    pub fn meta(&self) -> &DisplayMeta {
        match self {
            Self::Select(s) => &s.meta,
            Self::Switch(s) => &s.meta,
            Self::Sensor(s) => &s.meta,
        }
    }
}
