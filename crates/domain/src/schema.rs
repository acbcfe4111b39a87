//! Configuration validator — raw tree in, typed [`DeviceConfig`] out.
//!
//! Validation is strict and side-effect free: unknown keys, missing required
//! fields, type mismatches, and attempts to override slot-fixed constraints
//! (a selector's option set, a sensor's unit/class) all fail with a
//! [`SchemaError`] naming the offending path. Nothing is instantiated here.

use serde_json::{Map, Value};

use crate::capability::DisplayMeta;
use crate::config::{DeviceConfig, SlotEntry};
use crate::error::{SchemaError, SchemaErrorKind};
use crate::id::Handle;
use crate::slot::{DESCRIPTORS, SlotDescriptor, SlotId, SlotKind};
use crate::variant::Variant;

/// Fields accepted on the root and on every block slot.
const META_KEYS: [&str; 5] = ["id", "name", "icon", "group", "sort_weight"];

/// Fields a measurement block may try to override but never can.
const MEASUREMENT_FIXED: [&str; 3] = ["unit_of_measurement", "device_class", "state_class"];

/// Validate a raw configuration tree into a typed [`DeviceConfig`].
///
/// # Errors
///
/// Returns a [`SchemaError`] with the dotted path of the first offending
/// field. The `variant` discriminant is checked before anything else.
pub fn validate(raw: &Value) -> Result<DeviceConfig, SchemaError> {
    let root = expect_table(raw, "(root)")?;

    // The discriminant must be present and valid before any slot is looked at.
    let variant_raw = root
        .get("variant")
        .ok_or_else(|| SchemaError::new("variant", SchemaErrorKind::Missing))?;
    let variant: Variant = expect_string(variant_raw, "variant")?
        .parse()
        .map_err(|kind| SchemaError::new("variant", kind))?;

    for key in root.keys() {
        let known = key == "variant"
            || META_KEYS.contains(&key.as_str())
            || SlotId::from_key(key).is_some();
        if !known {
            return Err(SchemaError::new(key.as_str(), SchemaErrorKind::UnknownField));
        }
    }

    let mut config = DeviceConfig::new(variant);
    config.handle = read_handle(root, "")?;
    config.meta = read_meta(root, "")?;

    for descriptor in &DESCRIPTORS {
        let Some(value) = root.get(descriptor.key) else {
            continue;
        };
        match descriptor.id {
            SlotId::HorizontalSwingSelect => {
                config.horizontal_swing_select = Some(read_entry(value, descriptor)?);
            }
            SlotId::VerticalSwingSelect => {
                config.vertical_swing_select = Some(read_entry(value, descriptor)?);
            }
            SlotId::OutsideTemperature => {
                config.outside_temperature = Some(read_entry(value, descriptor)?);
            }
            SlotId::InsideTemperature => {
                config.inside_temperature = Some(read_entry(value, descriptor)?);
            }
            SlotId::CurrentPowerConsumption => {
                config.current_power_consumption = Some(read_entry(value, descriptor)?);
            }
            SlotId::NanoexSwitch => {
                config.nanoex_switch = Some(read_entry(value, descriptor)?);
            }
            SlotId::EcoSwitch => {
                config.eco_switch = Some(read_entry(value, descriptor)?);
            }
            SlotId::EconaviSwitch => {
                config.econavi_switch = Some(read_entry(value, descriptor)?);
            }
            SlotId::MildDrySwitch => {
                config.mild_dry_switch = Some(read_entry(value, descriptor)?);
            }
            SlotId::CurrentTemperatureSensor => {
                // A bare identity handle, not a block.
                let handle = expect_string(value, descriptor.key)?;
                config.current_temperature_sensor = Some(Handle::new(handle));
            }
        }
    }

    Ok(config)
}

fn read_entry(value: &Value, descriptor: &SlotDescriptor) -> Result<SlotEntry, SchemaError> {
    let table = expect_table(value, descriptor.key)?;

    for key in table.keys() {
        if META_KEYS.contains(&key.as_str()) {
            continue;
        }
        let kind = fixed_field(descriptor, key)
            .map_or(SchemaErrorKind::UnknownField, SchemaErrorKind::FixedField);
        return Err(SchemaError::new(join(descriptor.key, key), kind));
    }

    Ok(SlotEntry {
        handle: read_handle(table, descriptor.key)?,
        meta: read_meta(table, descriptor.key)?,
    })
}

/// If `key` names a slot-fixed constraint for this descriptor, return its
/// canonical spelling; otherwise it is merely unknown.
fn fixed_field(descriptor: &SlotDescriptor, key: &str) -> Option<&'static str> {
    match descriptor.kind {
        SlotKind::Selector { .. } if key == "options" => Some("options"),
        SlotKind::Measurement { .. } => {
            MEASUREMENT_FIXED.iter().find(|fixed| **fixed == key).copied()
        }
        _ => None,
    }
}

fn read_handle(table: &Map<String, Value>, prefix: &str) -> Result<Option<Handle>, SchemaError> {
    table
        .get("id")
        .map(|v| expect_string(v, &join(prefix, "id")).map(Handle::new))
        .transpose()
}

fn read_meta(table: &Map<String, Value>, prefix: &str) -> Result<DisplayMeta, SchemaError> {
    let string_field = |key: &str| -> Result<Option<String>, SchemaError> {
        table
            .get(key)
            .map(|v| expect_string(v, &join(prefix, key)).map(str::to_owned))
            .transpose()
    };
    let sort_weight = table
        .get("sort_weight")
        .map(|v| expect_integer(v, &join(prefix, "sort_weight")))
        .transpose()?;

    Ok(DisplayMeta {
        name: string_field("name")?,
        icon: string_field("icon")?,
        group: string_field("group")?,
        sort_weight,
    })
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn expect_table<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| SchemaError::new(path, SchemaErrorKind::ExpectedTable))
}

fn expect_string<'a>(value: &'a Value, path: &str) -> Result<&'a str, SchemaError> {
    value
        .as_str()
        .ok_or_else(|| SchemaError::new(path, SchemaErrorKind::ExpectedString))
}

fn expect_integer(value: &Value, path: &str) -> Result<i64, SchemaError> {
    value
        .as_i64()
        .ok_or_else(|| SchemaError::new(path, SchemaErrorKind::ExpectedInteger))
}
