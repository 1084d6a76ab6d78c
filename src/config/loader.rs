//! Configuration Loader
//!
//! Layers built-in defaults, an optional file and `TASKER_EVENTS_*` environment
//! variables, in that order of precedence (last wins).

use super::{RegistryConfig, ENV_PREFIX};
use crate::error::EventResult;
use config::{Config, ConfigBuilder, Environment, File};
use std::path::Path;
use tracing::debug;

impl RegistryConfig {
    /// Load configuration from defaults and environment variables
    pub fn load() -> EventResult<Self> {
        Self::build(None)
    }

    /// Load configuration from a file (toml, yaml or json by extension), then
    /// apply environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> EventResult<Self> {
        Self::build(Some(path.as_ref()))
    }

    fn build(path: Option<&Path>) -> EventResult<Self> {
        let mut builder = Self::with_defaults(Config::builder())?;

        if let Some(path) = path {
            debug!("Loading registry configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: RegistryConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;

        debug!(
            name = %config.name,
            max_callbacks_per_event = config.max_callbacks_per_event,
            require_named_in_batch = config.require_named_in_batch,
            trace_dispatch = config.trace_dispatch,
            "Registry configuration loaded"
        );

        Ok(config)
    }

    fn with_defaults(
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> EventResult<ConfigBuilder<config::builder::DefaultState>> {
        let defaults = RegistryConfig::default();
        Ok(builder
            .set_default("name", defaults.name)?
            .set_default(
                "max_callbacks_per_event",
                defaults.max_callbacks_per_event as u64,
            )?
            .set_default("require_named_in_batch", defaults.require_named_in_batch)?
            .set_default("trace_dispatch", defaults.trace_dispatch)?)
    }
}
