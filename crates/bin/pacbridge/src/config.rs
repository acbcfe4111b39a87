//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `pacbridge.toml` in the working directory (override the path
//! with `PACBRIDGE_CONFIG`). Every field except the `[climate]` table has a
//! sensible default. Environment variables take precedence over file values.

use serde::Deserialize;

use pacbridge_domain::capability::{DisplayMeta, MeasurementClass, MeasurementSensor, Unit};
use pacbridge_domain::id::{CapabilityId, Handle};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Serial transport settings, passed through to the protocol layer.
    pub uart: UartConfig,
    /// Externally owned sensors, declared before the climate device so the
    /// reference slot can resolve them. `[[sensor]]` entries, in file order.
    pub sensor: Vec<SensorDecl>,
    /// The climate device configuration tree, validated by the domain
    /// schema rather than deserialized here.
    pub climate: Option<toml::Value>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Serial port configuration for the excluded transport layer.
///
/// The Panasonic units speak 9600 baud, 8 data bits, even parity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UartConfig {
    /// Serial device path.
    pub port: String,
    /// Baud rate.
    pub baud: u32,
    /// Parity mode.
    pub parity: Parity,
}

/// Serial parity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    None,
    #[default]
    Even,
    Odd,
}

/// One externally owned temperature sensor declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorDecl {
    /// Identity handle other declarations reference.
    pub id: String,
    /// Optional display name.
    pub name: Option<String>,
}

impl SensorDecl {
    /// Build the domain sensor this declaration owns.
    #[must_use]
    pub fn to_sensor(&self) -> MeasurementSensor {
        MeasurementSensor {
            id: CapabilityId::new(),
            handle: Handle::new(self.id.clone()),
            meta: DisplayMeta {
                name: self.name.clone(),
                ..DisplayMeta::default()
            },
            unit: Unit::Celsius,
            class: MeasurementClass::Temperature,
        }
    }
}

impl Config {
    /// Load configuration from `pacbridge.toml` (or `PACBRIDGE_CONFIG`) then
    /// apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// semantic check fails.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PACBRIDGE_CONFIG")
            .unwrap_or_else(|_| "pacbridge.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PACBRIDGE_UART_PORT") {
            self.uart.port = val;
        }
        if let Ok(val) = std::env::var("PACBRIDGE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.uart.baud == 0 {
            return Err(ConfigError::Validation("baud must be non-zero".to_string()));
        }
        let mut seen = std::collections::HashSet::new();
        for decl in &self.sensor {
            if decl.id.is_empty() {
                return Err(ConfigError::Validation("sensor id must not be empty".to_string()));
            }
            if !seen.insert(decl.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate sensor id `{}`",
                    decl.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "pacbridge=info,pacbridge_app=info".to_string(),
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            baud: 9600,
            parity: Parity::Even,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
