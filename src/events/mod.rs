//! # Events
//!
//! In-process event registration and synchronous dispatch.
//!
//! - [`registry`] - [`EventRegistry`], the name to callbacks mapping and all its operations
//! - [`callback`] - Callback, listener and batch types
//! - [`token`] - Opaque handles returned by registration
//! - [`stats`] - Read-only registry snapshots

pub mod callback;
pub mod registry;
pub mod stats;
pub mod token;

// Re-export key types for convenience
pub use callback::{Callback, CallbackError, CallbackSet, Listener};
pub use registry::EventRegistry;
pub use stats::{EventStats, RegistryStats};
pub use token::SubscriptionToken;
