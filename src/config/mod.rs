//! # Registry Configuration
//!
//! Settings that tune how an [`EventRegistry`](crate::events::EventRegistry) logs and
//! validates registrations. None of them change dispatch semantics.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasker_events::config::RegistryConfig;
//! use tasker_events::events::EventRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Defaults overridden by TASKER_EVENTS_* environment variables
//! let config = RegistryConfig::load()?;
//! let registry: EventRegistry = EventRegistry::with_config(config);
//! # Ok(())
//! # }
//! ```

pub mod loader;

use crate::error::{EventRegistryError, EventResult};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `TASKER_EVENTS_MAX_CALLBACKS_PER_EVENT=16`
pub const ENV_PREFIX: &str = "TASKER_EVENTS";

/// Root configuration for a single registry instance
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Label used in logs and stats
    pub name: String,

    /// Warn once an event holds more callbacks than this. `0` disables the check.
    pub max_callbacks_per_event: usize,

    /// Reject anonymous listeners in batch registration
    pub require_named_in_batch: bool,

    /// Emit a trace record for every callback invocation
    pub trace_dispatch: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            max_callbacks_per_event: 0,
            require_named_in_batch: false,
            trace_dispatch: false,
        }
    }
}

impl RegistryConfig {
    /// Named configuration with all other settings at their defaults
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> EventResult<()> {
        if self.name.trim().is_empty() {
            return Err(EventRegistryError::Configuration(
                "name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether `count` callbacks on one event exceeds the configured ceiling
    pub fn exceeds_callback_limit(&self, count: usize) -> bool {
        self.max_callbacks_per_event > 0 && count > self.max_callbacks_per_event
    }
}
