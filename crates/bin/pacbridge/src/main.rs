//! # pacbridge — composition root
//!
//! Wires the climate device together from `pacbridge.toml` at startup.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars — no CLI flags)
//! - Declare externally owned sensors ahead of the device that references them
//! - Validate the `[climate]` tree against the domain schema
//! - Run the composition engine and report the resulting wiring
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context;
use pacbridge_app::composer::Composer;
use pacbridge_app::registry::InProcessRegistry;
use pacbridge_domain::schema;

use config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    tracing::info!(
        port = %config.uart.port,
        baud = config.uart.baud,
        parity = ?config.uart.parity,
        "transport target"
    );

    // Declaration order matters: references resolve against what exists.
    let mut registry = InProcessRegistry::new();
    for decl in &config.sensor {
        tracing::debug!(id = %decl.id, "external sensor declared");
        registry.declare_sensor(decl.to_sensor());
    }

    let climate = config
        .climate
        .as_ref()
        .context("pacbridge.toml has no [climate] table")?;
    let raw = serde_json::to_value(climate).context("climate table is not valid JSON data")?;
    let device_config = schema::validate(&raw)?;

    let mut composer = Composer::new(registry);
    let device = composer.compose(device_config)?;

    tracing::info!(
        kind = %device.kind,
        device = %device.display_name(),
        id = %device.id,
        "climate device assembled"
    );
    for slot in device.bound_slots() {
        tracing::info!(%slot, "slot wired");
    }

    Ok(())
}
