//! Error types for the event registry.
//!

use crate::events::callback::CallbackError;
use crate::events::token::SubscriptionToken;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventRegistryError {
    #[error("Invalid event name '{event_name}': {reason}")]
    InvalidEventName { event_name: String, reason: String },

    /// Named registration without a usable name; it could never be targeted by name later
    #[error("Anonymous callback rejected for event '{event_name}': a callback name is required")]
    AnonymousCallback { event_name: String },

    #[error("Invalid batch entry for event '{event_name}': {reason}")]
    InvalidBatch { event_name: String, reason: String },

    /// A callback failed during `fire`; remaining callbacks for that pass were not invoked
    #[error("Callback {token} failed while handling event '{event_name}': {source}")]
    CallbackFailed {
        event_name: String,
        token: SubscriptionToken,
        #[source]
        source: CallbackError,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<config::ConfigError> for EventRegistryError {
    fn from(error: config::ConfigError) -> Self {
        EventRegistryError::Configuration(error.to_string())
    }
}

impl EventRegistryError {
    /// Event name this error refers to, if any
    pub fn event_name(&self) -> Option<&str> {
        match self {
            EventRegistryError::InvalidEventName { event_name, .. }
            | EventRegistryError::AnonymousCallback { event_name }
            | EventRegistryError::InvalidBatch { event_name, .. }
            | EventRegistryError::CallbackFailed { event_name, .. } => Some(event_name),
            EventRegistryError::Configuration(_) => None,
        }
    }
}

pub type EventResult<T> = std::result::Result<T, EventRegistryError>;
