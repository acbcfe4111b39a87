//! Typed device configuration — the validated form of the raw tree.
//!
//! A [`DeviceConfig`] is transient: the composition engine consumes it once
//! and produces a [`DeviceInstance`](crate::device::DeviceInstance). Build
//! one through [`schema::validate`](crate::schema::validate); the fields are
//! public so tests and tools can also construct configs directly.

use crate::capability::DisplayMeta;
use crate::id::Handle;
use crate::slot::SlotId;
use crate::variant::Variant;

/// Configuration for one present block slot (selector, toggle, or owned
/// measurement). Slot-specific constraints (option set, unit, class) are
/// fixed in the catalog and intentionally absent here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotEntry {
    /// Declaration identity; generated from the device handle when unset.
    pub handle: Option<Handle>,
    /// Display metadata pass-through.
    pub meta: DisplayMeta,
}

/// The validated root configuration for one device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    /// Protocol discriminant; always set and valid before instantiation.
    pub variant: Variant,
    /// Device declaration identity; generated when unset.
    pub handle: Option<Handle>,
    /// Device display metadata pass-through.
    pub meta: DisplayMeta,

    pub horizontal_swing_select: Option<SlotEntry>,
    pub vertical_swing_select: Option<SlotEntry>,
    pub outside_temperature: Option<SlotEntry>,
    pub inside_temperature: Option<SlotEntry>,
    pub current_power_consumption: Option<SlotEntry>,
    pub nanoex_switch: Option<SlotEntry>,
    pub eco_switch: Option<SlotEntry>,
    pub econavi_switch: Option<SlotEntry>,
    pub mild_dry_switch: Option<SlotEntry>,
    /// Identity of an externally declared sensor, not an owned block.
    pub current_temperature_sensor: Option<Handle>,
}

impl DeviceConfig {
    /// A configuration with the given variant and every slot absent.
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            handle: None,
            meta: DisplayMeta::default(),
            horizontal_swing_select: None,
            vertical_swing_select: None,
            outside_temperature: None,
            inside_temperature: None,
            current_power_consumption: None,
            nanoex_switch: None,
            eco_switch: None,
            econavi_switch: None,
            mild_dry_switch: None,
            current_temperature_sensor: None,
        }
    }

    /// The entry for a block slot, or `None` when absent.
    ///
    /// The reference slot carries a bare handle instead of a block; asking
    /// for its entry always yields `None` — read
    /// [`current_temperature_sensor`](Self::current_temperature_sensor)
    /// instead.
    #[must_use]
    pub fn entry(&self, slot: SlotId) -> Option<&SlotEntry> {
        match slot {
            SlotId::HorizontalSwingSelect => self.horizontal_swing_select.as_ref(),
            SlotId::VerticalSwingSelect => self.vertical_swing_select.as_ref(),
            SlotId::OutsideTemperature => self.outside_temperature.as_ref(),
            SlotId::InsideTemperature => self.inside_temperature.as_ref(),
            SlotId::CurrentPowerConsumption => self.current_power_consumption.as_ref(),
            SlotId::NanoexSwitch => self.nanoex_switch.as_ref(),
            SlotId::EcoSwitch => self.eco_switch.as_ref(),
            SlotId::EconaviSwitch => self.econavi_switch.as_ref(),
            SlotId::MildDrySwitch => self.mild_dry_switch.as_ref(),
            SlotId::CurrentTemperatureSensor => None,
        }
    }

    /// Number of present optional slots (0..=10).
    #[must_use]
    pub fn present_count(&self) -> usize {
        let blocks = SlotId::ALL
            .iter()
            .filter(|slot| self.entry(**slot).is_some())
            .count();
        blocks + usize::from(self.current_temperature_sensor.is_some())
    }
}
