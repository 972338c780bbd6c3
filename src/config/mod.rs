//! Engine Configuration Module
//!
//! Provides engine settings loaded from TOML: DLS risk bands, trajectory
//! integration, wavelet sampling, and schematic section layout.
//!
//! ## Loading Order
//!
//! 1. `WELLGEO_CONFIG` environment variable (path to TOML file)
//! 2. `wellgeo.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! The calculators take their settings as arguments. The binary loads once
//! and publishes the result globally:
//!
//! ```ignore
//! // In main():
//! config::init(EngineConfig::load());
//!
//! // Anywhere in the binary:
//! let bands = &config::get().risk;
//! ```

mod engine_config;
pub mod defaults;
pub mod validation;

pub use engine_config::*;

use std::sync::OnceLock;

/// Global engine configuration, initialized once at startup.
static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Initialize the global engine configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: EngineConfig) {
    if ENGINE_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global engine configuration.
///
/// Falls back to the built-in defaults when `init()` was never called.
pub fn get() -> &'static EngineConfig {
    ENGINE_CONFIG.get_or_init(EngineConfig::default)
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    ENGINE_CONFIG.get().is_some()
}
