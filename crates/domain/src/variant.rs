//! Protocol variant — the discriminant between the two wire implementations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaErrorKind;

/// The two mutually exclusive protocol implementations for the physical unit.
///
/// `cnt` talks to the unit's internal connector; `wlan` talks through the
/// DNSK-P11 wifi module header. Exactly one is selected per device, once,
/// before any instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Cnt,
    Wlan,
}

impl Variant {
    /// Canonical lowercase spelling, as written in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cnt => "cnt",
            Self::Wlan => "wlan",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = SchemaErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cnt" => Ok(Self::Cnt),
            "wlan" => Ok(Self::Wlan),
            other => Err(SchemaErrorKind::UnknownVariant(other.to_string())),
        }
    }
}
