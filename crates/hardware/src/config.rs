//! Configuration for the execution core.
//!
//! This module defines the configuration structures used to parameterize the
//! core. It provides:
//! 1. **Defaults:** Architected behaviour when a field is omitted.
//! 2. **Structures:** General (tracing, start address) and interrupt polling settings.
//! 3. **Parsing:** JSON input via `Config::from_json`, validated before use.
//!
//! Configuration is supplied as JSON by the embedder, or use `Config::default()`.

use serde::Deserialize;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Steps between calls of the bus interrupt-polling hook.
    pub const POLL_INTERVAL: u64 = 1;
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General execution settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// External interrupt polling settings.
    #[serde(default)]
    pub interrupts: InterruptConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Arguments
    ///
    /// * `json` - The configuration document. Missing sections and fields take
    ///   their defaults.
    ///
    /// # Returns
    ///
    /// The configuration, or `ConfigError` if the document does not parse or a
    /// value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(pc) = self.general.start_pc
            && pc % INSTRUCTION_SIZE != 0
        {
            return Err(ConfigError::InvalidValue {
                field: "general.start_pc",
                reason: format!("{pc:#010x} is not word aligned"),
            });
        }
        Ok(())
    }
}

/// General execution settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Emit a `trace` event for every executed instruction.
    #[serde(default)]
    pub trace_instructions: bool,
    /// Program counter after reset. `None` uses the reset vector.
    #[serde(default)]
    pub start_pc: Option<u32>,
}

/// External interrupt polling settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterruptConfig {
    /// Steps between calls of [`Bus::poll_interrupts`](crate::soc::Bus::poll_interrupts).
    /// Zero disables polling.
    #[serde(default = "InterruptConfig::default_poll_interval")]
    pub poll_interval: u64,
}

impl InterruptConfig {
    const fn default_poll_interval() -> u64 {
        defaults::POLL_INTERVAL
    }
}

impl Default for InterruptConfig {
    fn default() -> Self {
        Self {
            poll_interval: Self::default_poll_interval(),
        }
    }
}
