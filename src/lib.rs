#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Tasker Events
//!
//! Synchronous, in-process publish/subscribe.
//!
//! ## Overview
//!
//! Callers register callbacks under event names and later fire an event by name,
//! invoking every callback registered for it with the supplied data. Everything
//! happens in-line on the caller's thread: there is no queue, no background
//! worker and no persistence.
//!
//! ## Key Features
//!
//! - **Token Handles**: Every registration returns a [`SubscriptionToken`] for removal
//! - **Named Callbacks**: Optional callback names for removal and lookup by name
//! - **Batch Registration**: Wire many events at once, validated as a whole
//! - **Reverse Dispatch**: Last-registered callbacks run first
//! - **Reentrant**: Callbacks can modify the registry that is firing them
//!
//! ## Module Organization
//!
//! - [`events`] - Event registry, callbacks, tokens and stats
//! - [`config`] - Registry configuration loading
//! - [`error`] - Structured error handling
//! - [`logging`] - Tracing setup and structured operation logs
//!
//! ## Quick Start
//!
//! ```rust
//! use tasker_events::{EventRegistry, EventResult};
//!
//! # fn main() -> EventResult<()> {
//! let registry: EventRegistry<u32> = EventRegistry::new();
//!
//! let t1 = registry.register("greet", |n: &u32, event: &str| {
//!     println!("A got {n} from {event}");
//!     Ok(())
//! })?;
//! registry.register("greet", |n: &u32, event: &str| {
//!     println!("B got {n} from {event}");
//!     Ok(())
//! })?;
//!
//! // Prints B first, then A
//! registry.fire("greet", &1)?;
//!
//! registry.remove("greet", t1);
//! registry.fire("greet", &2)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Operations on unknown event names are silent no-ops. A callback that returns
//! an error stops the `fire` call it runs in, and the error is returned to the
//! caller; there is no fault isolation between callbacks.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::RegistryConfig;
pub use error::{EventRegistryError, EventResult};
pub use events::{
    Callback, CallbackError, CallbackSet, EventRegistry, EventStats, Listener, RegistryStats,
    SubscriptionToken,
};
