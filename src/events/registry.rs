//! # Event Registry
//!
//! Named-event subscription and synchronous dispatch.
//!
//! ## Features
//!
//! - **Ordered Registrations**: Each event keeps its callbacks in registration order
//! - **Reverse Dispatch**: `fire` invokes the most recently registered callback first
//! - **Token and Name Removal**: Remove one registration by token, or all by callback name
//! - **Reentrancy**: Callbacks may call back into the registry while it is firing
//! - **No Fault Isolation**: The first failing callback aborts the rest of that `fire`
//!
//! ## Usage Example
//!
//! ```rust
//! use tasker_events::events::{EventRegistry, Listener};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry: EventRegistry<String> = EventRegistry::new();
//!
//! let token = registry.register("greet", |data: &String, event: &str| {
//!     println!("{event}: {data}");
//!     Ok(())
//! })?;
//! registry.register_listener(
//!     "greet",
//!     Listener::named("shout", |data: &String, _event: &str| {
//!         println!("{}", data.to_uppercase());
//!         Ok(())
//!     }),
//! )?;
//!
//! // "shout" runs first, then the anonymous callback
//! registry.fire("greet", &"hi".to_string())?;
//!
//! registry.remove("greet", token).remove_by_name("greet", "shout");
//! assert_eq!(registry.callbacks_for("greet"), Some(0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Mutation While Firing
//!
//! `fire` takes the event's tokens from tail to head, then walks that list. Before
//! each invocation it looks the token up in the live sequence and clones the
//! registration out; the lock is released while the callback runs. A registration
//! removed by an earlier callback of the same pass is skipped. Registrations added
//! during the walk are only seen by later `fire` calls, and the walk ends early if
//! the event is dropped.
//!
//! Removals only shift entries down and additions land at the tail, so each lookup
//! starts below the previous match. Without mutation a pass over `n` callbacks does
//! `O(n)` lookup work in total.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use super::callback::{Callback, CallbackError, CallbackSet, Listener};
use super::stats::{EventStats, RegistryStats};
use super::token::{SubscriptionToken, TokenMinter};
use crate::config::RegistryConfig;
use crate::error::{EventRegistryError, EventResult};
use crate::logging::log_registry_operation;

/// One callback attached to one event
struct Registration<D> {
    token: SubscriptionToken,
    callback: Callback<D>,
    callback_name: Option<String>,
}

impl<D> Clone for Registration<D> {
    fn clone(&self) -> Self {
        Self {
            token: self.token,
            callback: self.callback.clone(),
            callback_name: self.callback_name.clone(),
        }
    }
}

/// Registrations for a single event name, plus dispatch bookkeeping
struct EventSlot<D> {
    /// Position of this name in first-registration order
    created_seq: u64,
    registrations: Vec<Registration<D>>,
    fire_count: u64,
    last_fired_at: Option<DateTime<Utc>>,
}

impl<D> EventSlot<D> {
    fn new(created_seq: u64) -> Self {
        Self {
            created_seq,
            registrations: Vec::new(),
            fire_count: 0,
            last_fired_at: None,
        }
    }
}

struct RegistryState<D> {
    events: HashMap<String, EventSlot<D>>,
    next_slot_seq: u64,
    total_fires: u64,
}

impl<D> RegistryState<D> {
    fn new() -> Self {
        Self {
            events: HashMap::new(),
            next_slot_seq: 0,
            total_fires: 0,
        }
    }

    fn slot_or_insert(&mut self, event_name: &str) -> &mut EventSlot<D> {
        let next_slot_seq = &mut self.next_slot_seq;
        self.events
            .entry(event_name.to_string())
            .or_insert_with(|| {
                let seq = *next_slot_seq;
                *next_slot_seq += 1;
                EventSlot::new(seq)
            })
    }

    /// Slots sorted by first-registration order
    fn ordered(&self) -> Vec<(&String, &EventSlot<D>)> {
        let mut slots: Vec<_> = self.events.iter().collect();
        slots.sort_by_key(|(_, slot)| slot.created_seq);
        slots
    }
}

/// Event registry mapping event names to ordered callback registrations
///
/// All methods take `&self`; the mapping is guarded by a mutex that is never held
/// while a callback runs, so callbacks can register, remove or fire through a
/// shared reference to the same registry.
///
/// ## Dispatch Order
///
/// Callbacks run last-registered first. Downstream code may rely on this order.
///
/// ## Unknown Events
///
/// Firing or modifying an event name that is not registered is a silent no-op.
pub struct EventRegistry<D = serde_json::Value> {
    id: Uuid,
    config: RegistryConfig,
    minter: TokenMinter,
    state: Mutex<RegistryState<D>>,
}

impl<D> EventRegistry<D> {
    /// Create an empty registry with default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with the given configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        let id = Uuid::new_v4();
        debug!(registry_id = %id, name = %config.name, "Created event registry");

        Self {
            id,
            config,
            minter: TokenMinter::new(id),
            state: Mutex::new(RegistryState::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register an anonymous callback on `event_name`
    ///
    /// Creates the event if it is new and appends the callback to its sequence.
    /// The same callback may be registered any number of times.
    ///
    /// # Returns
    ///
    /// The token identifying this registration, used by [`remove`](Self::remove)
    pub fn register<F>(&self, event_name: &str, callback: F) -> EventResult<SubscriptionToken>
    where
        F: Fn(&D, &str) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.register_listener(event_name, Listener::new(callback))
    }

    /// Register a callback that can also be addressed by `callback_name`
    ///
    /// A blank name is rejected with [`EventRegistryError::AnonymousCallback`]
    /// and the registry is left unchanged.
    pub fn register_named<F>(
        &self,
        event_name: &str,
        callback_name: &str,
        callback: F,
    ) -> EventResult<SubscriptionToken>
    where
        F: Fn(&D, &str) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        let listener = Listener::named(callback_name, callback);
        if listener.is_anonymous() {
            return Err(EventRegistryError::AnonymousCallback {
                event_name: event_name.to_string(),
            });
        }
        self.register_listener(event_name, listener)
    }

    /// Register a prepared [`Listener`]
    pub fn register_listener(
        &self,
        event_name: &str,
        listener: Listener<D>,
    ) -> EventResult<SubscriptionToken> {
        validate_event_name(event_name)?;

        let token = {
            let mut state = self.state.lock();
            self.push_listener(&mut state, event_name, listener)
        };

        log_registry_operation(
            "register",
            &self.config.name,
            Some(event_name),
            Some(&token.to_string()),
            "success",
            None,
        );

        Ok(token)
    }

    /// Register many callbacks at once
    ///
    /// The whole batch is validated before anything is registered. On failure the
    /// registry is unchanged and the first offending entry is reported.
    ///
    /// # Returns
    ///
    /// Tokens for every registered listener, in the order given
    pub fn register_batch<I, S>(&self, entries: I) -> EventResult<Vec<SubscriptionToken>>
    where
        I: IntoIterator<Item = (S, CallbackSet<D>)>,
        S: Into<String>,
    {
        let entries: Vec<(String, CallbackSet<D>)> = entries
            .into_iter()
            .map(|(name, set)| (name.into(), set))
            .collect();

        for (event_name, set) in &entries {
            self.validate_batch_entry(event_name, set)?;
        }

        let event_count = entries.len();
        let tokens = {
            let mut state = self.state.lock();
            let mut tokens = Vec::new();
            for (event_name, set) in entries {
                for listener in set.into_listeners() {
                    tokens.push(self.push_listener(&mut state, &event_name, listener));
                }
            }
            tokens
        };

        log_registry_operation(
            "register_batch",
            &self.config.name,
            None,
            None,
            "success",
            Some(&format!(
                "{} events, {} callbacks",
                event_count,
                tokens.len()
            )),
        );

        Ok(tokens)
    }

    /// Fire `event_name`, invoking its callbacks last-registered first
    ///
    /// Each callback receives `(data, event_name)`. Unknown events are a no-op.
    ///
    /// # Errors
    ///
    /// The first callback returning `Err` stops the walk; its error is returned as
    /// [`EventRegistryError::CallbackFailed`]. Panics are not caught.
    pub fn fire(&self, event_name: &str, data: &D) -> EventResult<&Self> {
        let pending: Vec<SubscriptionToken> = {
            let mut state = self.state.lock();
            let Some(slot) = state.events.get_mut(event_name) else {
                debug!("No event '{}' registered, fire is a no-op", event_name);
                return Ok(self);
            };
            slot.fire_count += 1;
            slot.last_fired_at = Some(Utc::now());
            let pending = slot.registrations.iter().rev().map(|r| r.token).collect();
            state.total_fires += 1;
            pending
        };

        debug!(
            registry = %self.config.name,
            event = %event_name,
            callbacks = pending.len(),
            "Firing event"
        );

        // Index of the last match; pending tokens only ever sit below it
        let mut cursor = pending.len();
        for token in pending {
            let registration = {
                let state = self.state.lock();
                let Some(slot) = state.events.get(event_name) else {
                    debug!("Event '{}' dropped while firing, stopping", event_name);
                    break;
                };
                let upper = cursor.min(slot.registrations.len());
                // Removed by an earlier callback in this pass
                match slot.registrations[..upper]
                    .iter()
                    .rposition(|r| r.token == token)
                {
                    Some(position) => {
                        cursor = position;
                        slot.registrations[position].clone()
                    }
                    None => continue,
                }
            };

            if self.config.trace_dispatch {
                trace!(
                    event = %event_name,
                    token = %registration.token,
                    callback_name = registration.callback_name.as_deref(),
                    "Invoking callback"
                );
            }

            (registration.callback)(data, event_name).map_err(|source| {
                warn!(
                    event = %event_name,
                    token = %registration.token,
                    error = %source,
                    "Callback failed, aborting remaining callbacks"
                );
                EventRegistryError::CallbackFailed {
                    event_name: event_name.to_string(),
                    token: registration.token,
                    source,
                }
            })?;
        }

        Ok(self)
    }

    /// Remove the registration identified by `token` from `event_name`
    pub fn remove(&self, event_name: &str, token: SubscriptionToken) -> &Self {
        let removed = self.retain_registrations(event_name, |r| r.token != token);
        if removed > 0 {
            log_registry_operation(
                "remove",
                &self.config.name,
                Some(event_name),
                Some(&token.to_string()),
                "success",
                None,
            );
        }
        self
    }

    /// Remove every registration on `event_name` whose callback name is `callback_name`
    pub fn remove_by_name(&self, event_name: &str, callback_name: &str) -> &Self {
        let removed = self.retain_registrations(event_name, |r| {
            r.callback_name.as_deref() != Some(callback_name)
        });
        if removed > 0 {
            log_registry_operation(
                "remove_by_name",
                &self.config.name,
                Some(event_name),
                Some(callback_name),
                "success",
                Some(&format!("{removed} removed")),
            );
        }
        self
    }

    /// Empty `event_name`'s callbacks; the event stays known
    pub fn clear(&self, event_name: &str) -> &Self {
        let cleared = {
            let mut state = self.state.lock();
            state
                .events
                .get_mut(event_name)
                .map(|slot| std::mem::take(&mut slot.registrations))
        };

        if cleared.is_some() {
            log_registry_operation(
                "clear",
                &self.config.name,
                Some(event_name),
                None,
                "success",
                None,
            );
        } else {
            debug!("No event '{}' registered, clear is a no-op", event_name);
        }
        self
    }

    /// Forget `event_name` entirely
    pub fn drop_event(&self, event_name: &str) -> &Self {
        let dropped = {
            let mut state = self.state.lock();
            state.events.remove(event_name)
        };

        if dropped.is_some() {
            log_registry_operation(
                "drop_event",
                &self.config.name,
                Some(event_name),
                None,
                "success",
                None,
            );
        } else {
            debug!("No event '{}' registered, drop is a no-op", event_name);
        }
        self
    }

    /// Forget every event
    ///
    /// Tokens keep counting from where they were, so old tokens never match new
    /// registrations.
    pub fn drop_all(&self) -> &Self {
        let dropped = {
            let mut state = self.state.lock();
            std::mem::take(&mut state.events)
        };

        log_registry_operation(
            "drop_all",
            &self.config.name,
            None,
            None,
            "success",
            Some(&format!("{} events dropped", dropped.len())),
        );
        self
    }

    /// Whether `event_name` is known, even with no callbacks
    pub fn exists(&self, event_name: &str) -> bool {
        self.state.lock().events.contains_key(event_name)
    }

    /// Whether a callback named `callback_name` is registered on `event_name`
    ///
    /// `None` when the event itself is unknown.
    pub fn has_callback(&self, event_name: &str, callback_name: &str) -> Option<bool> {
        let state = self.state.lock();
        state.events.get(event_name).map(|slot| {
            slot.registrations
                .iter()
                .any(|r| r.callback_name.as_deref() == Some(callback_name))
        })
    }

    /// Whether `token` is still registered on `event_name`
    pub fn contains_token(&self, event_name: &str, token: SubscriptionToken) -> bool {
        let state = self.state.lock();
        state
            .events
            .get(event_name)
            .is_some_and(|slot| slot.registrations.iter().any(|r| r.token == token))
    }

    /// Known event names in first-registration order
    pub fn list_event_names(&self) -> Vec<String> {
        let state = self.state.lock();
        state
            .ordered()
            .into_iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Number of callbacks on `event_name`, `None` if unknown
    pub fn callbacks_for(&self, event_name: &str) -> Option<usize> {
        let state = self.state.lock();
        state.events.get(event_name).map(|slot| slot.registrations.len())
    }

    /// Number of known events
    pub fn event_count(&self) -> usize {
        self.state.lock().events.len()
    }

    /// Total number of callbacks across all events
    pub fn callback_count(&self) -> usize {
        let state = self.state.lock();
        state.events.values().map(|slot| slot.registrations.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().events.is_empty()
    }

    /// Snapshot of registry statistics
    pub fn stats(&self) -> RegistryStats {
        let state = self.state.lock();

        let events: Vec<EventStats> = state
            .ordered()
            .into_iter()
            .map(|(name, slot)| EventStats {
                event_name: name.clone(),
                callback_count: slot.registrations.len(),
                callback_names: slot
                    .registrations
                    .iter()
                    .filter_map(|r| r.callback_name.clone())
                    .collect(),
                fire_count: slot.fire_count,
                last_fired_at: slot.last_fired_at,
            })
            .collect();

        RegistryStats {
            registry_id: self.id,
            registry_name: self.config.name.clone(),
            total_events: events.len(),
            total_callbacks: events.iter().map(|e| e.callback_count).sum(),
            total_fires: state.total_fires,
            events,
        }
    }

    fn push_listener(
        &self,
        state: &mut RegistryState<D>,
        event_name: &str,
        listener: Listener<D>,
    ) -> SubscriptionToken {
        let token = self.minter.mint();
        let slot = state.slot_or_insert(event_name);

        slot.registrations.push(Registration {
            token,
            callback: listener.callback,
            callback_name: listener.name,
        });

        let count = slot.registrations.len();
        if self.config.exceeds_callback_limit(count) {
            warn!(
                registry = %self.config.name,
                event = %event_name,
                callbacks = count,
                limit = self.config.max_callbacks_per_event,
                "Event exceeds configured callback limit, possible leak"
            );
        }

        token
    }

    fn validate_batch_entry(&self, event_name: &str, set: &CallbackSet<D>) -> EventResult<()> {
        validate_event_name(event_name).map_err(|_| EventRegistryError::InvalidBatch {
            event_name: event_name.to_string(),
            reason: "event name cannot be empty".to_string(),
        })?;

        if set.is_empty() {
            return Err(EventRegistryError::InvalidBatch {
                event_name: event_name.to_string(),
                reason: "no callbacks given".to_string(),
            });
        }

        if self.config.require_named_in_batch {
            if let Some(position) = set.listeners().iter().position(Listener::is_anonymous) {
                return Err(EventRegistryError::InvalidBatch {
                    event_name: event_name.to_string(),
                    reason: format!("callback at position {position} is anonymous"),
                });
            }
        }

        Ok(())
    }

    /// Keep registrations matching `keep`; returns how many were removed
    ///
    /// Removed callbacks are dropped outside the lock.
    fn retain_registrations<P>(&self, event_name: &str, keep: P) -> usize
    where
        P: Fn(&Registration<D>) -> bool,
    {
        let removed: Vec<Registration<D>> = {
            let mut state = self.state.lock();
            let Some(slot) = state.events.get_mut(event_name) else {
                debug!("No event '{}' registered, removal is a no-op", event_name);
                return 0;
            };

            let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut slot.registrations)
                .into_iter()
                .partition(|r| keep(r));
            slot.registrations = kept;
            removed
        };

        removed.len()
    }
}

fn validate_event_name(event_name: &str) -> EventResult<()> {
    if event_name.is_empty() {
        return Err(EventRegistryError::InvalidEventName {
            event_name: event_name.to_string(),
            reason: "Event name cannot be empty".to_string(),
        });
    }
    Ok(())
}

impl<D> Default for EventRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual Debug implementation for EventRegistry
impl<D> fmt::Debug for EventRegistry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("id", &self.id)
            .field("name", &self.config.name)
            .field("event_count", &self.event_count())
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    type Log = Arc<parking_lot::Mutex<Vec<String>>>;

    /// Helper to create a handler that records its label
    fn recording(log: &Log, label: &str) -> impl Fn(&String, &str) -> Result<(), CallbackError> {
        let log = log.clone();
        let label = label.to_string();
        move |data: &String, event: &str| {
            log.lock().push(format!("{label}:{data}:{event}"));
            Ok(())
        }
    }

    /// Helper to create a success handler with counter
    fn counting(counter: &Arc<AtomicUsize>) -> impl Fn(&String, &str) -> Result<(), CallbackError> {
        let counter = counter.clone();
        move |_data: &String, _event: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_new_registry() {
        let registry: EventRegistry<String> = EventRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.event_count(), 0);
        assert_eq!(registry.callback_count(), 0);
        assert_eq!(registry.name(), "default");
    }

    #[test]
    fn test_register_creates_event() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let token = registry.register("greet", counting(&counter)).unwrap();

        assert!(registry.exists("greet"));
        assert_eq!(registry.callbacks_for("greet"), Some(1));
        assert!(registry.contains_token("greet", token));
        assert_eq!(token.registry_id(), registry.id());
    }

    #[test]
    fn test_register_empty_event_name() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let result = registry.register("", counting(&counter));

        match result {
            Err(EventRegistryError::InvalidEventName { event_name, reason }) => {
                assert_eq!(event_name, "");
                assert!(reason.contains("empty"));
            }
            other => panic!("Expected InvalidEventName error, got {other:?}"),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_named_rejects_anonymous() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let result = registry.register_named("greet", "", counting(&counter));

        assert!(matches!(
            result,
            Err(EventRegistryError::AnonymousCallback { ref event_name }) if event_name == "greet"
        ));
        assert!(!registry.exists("greet"));
    }

    #[test]
    fn test_duplicate_callbacks_are_not_deduplicated() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let callback = counting(&counter);
        let shared: Callback<String> = Arc::new(callback);

        registry
            .register_listener("tick", Listener::from_callback(None, shared.clone()))
            .unwrap();
        registry
            .register_listener("tick", Listener::from_callback(None, shared))
            .unwrap();

        registry.fire("tick", &"x".to_string()).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fire_runs_in_reverse_registration_order() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let log: Log = Arc::default();

        registry.register("greet", recording(&log, "A")).unwrap();
        registry.register("greet", recording(&log, "B")).unwrap();
        registry.register("greet", recording(&log, "C")).unwrap();

        registry.fire("greet", &"hi".to_string()).unwrap();

        assert_eq!(
            *log.lock(),
            vec!["C:hi:greet", "B:hi:greet", "A:hi:greet"]
        );
    }

    #[test]
    fn test_fire_unknown_event_is_noop() {
        let registry: EventRegistry<String> = EventRegistry::new();

        let result = registry.fire("unset", &"1".to_string());

        assert!(result.is_ok());
        assert!(!registry.exists("unset"));
        assert_eq!(registry.stats().total_fires, 0);
    }

    #[test]
    fn test_fire_failure_aborts_remaining_callbacks() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));

        // Registered first, so it would run last
        registry.register("save", counting(&counter)).unwrap();
        let failing = registry
            .register("save", |_data: &String, _event: &str| {
                Err(CallbackError::failed("disk full"))
            })
            .unwrap();

        let err = registry.fire("save", &"doc".to_string()).unwrap_err();

        match err {
            EventRegistryError::CallbackFailed {
                event_name,
                token,
                source,
            } => {
                assert_eq!(event_name, "save");
                assert_eq!(token, failing);
                assert_eq!(source, CallbackError::failed("disk full"));
            }
            other => panic!("Expected CallbackFailed error, got {other:?}"),
        }
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remove_by_token() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let log: Log = Arc::default();

        let t1 = registry.register("greet", recording(&log, "A")).unwrap();
        registry.register("greet", recording(&log, "B")).unwrap();

        registry.remove("greet", t1);
        registry.fire("greet", &"bye".to_string()).unwrap();

        assert_eq!(*log.lock(), vec!["B:bye:greet"]);
        assert!(!registry.contains_token("greet", t1));
    }

    #[test]
    fn test_remove_with_foreign_token_is_noop() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let other: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));

        registry.register("greet", counting(&counter)).unwrap();
        let foreign = other.register("greet", counting(&counter)).unwrap();

        registry.remove("greet", foreign);
        assert_eq!(registry.callbacks_for("greet"), Some(1));
    }

    #[test]
    fn test_remove_by_name_removes_all_matches() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let log: Log = Arc::default();

        registry
            .register_named("greet", "logger", recording(&log, "L1"))
            .unwrap();
        registry
            .register_named("greet", "logger", recording(&log, "L2"))
            .unwrap();
        registry
            .register_named("greet", "printer", recording(&log, "P"))
            .unwrap();

        registry.remove_by_name("greet", "logger");

        assert_eq!(registry.has_callback("greet", "logger"), Some(false));
        assert_eq!(registry.has_callback("greet", "printer"), Some(true));
        registry.fire("greet", &"hi".to_string()).unwrap();
        assert_eq!(*log.lock(), vec!["P:hi:greet"]);
    }

    #[test]
    fn test_blank_listener_name_registers_anonymously() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));

        registry
            .register_listener("e", Listener::named("   ", counting(&counter)))
            .unwrap();

        assert_eq!(registry.has_callback("e", "   "), Some(false));
        assert!(registry.stats().event("e").unwrap().callback_names.is_empty());

        // Name-based removal cannot reach it
        registry.remove_by_name("e", "   ");
        assert_eq!(registry.callbacks_for("e"), Some(1));
    }

    #[test]
    fn test_register_named_rejects_blank() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let result = registry.register_named("greet", " \t", counting(&counter));

        assert!(matches!(
            result,
            Err(EventRegistryError::AnonymousCallback { .. })
        ));
        assert!(!registry.exists("greet"));
    }

    #[test]
    fn test_batch_blank_listener_name_registers_anonymously() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));

        registry
            .register_batch([(
                "f",
                CallbackSet::Single(Listener::named("", counting(&counter))),
            )])
            .unwrap();

        assert_eq!(registry.has_callback("f", ""), Some(false));
        assert!(registry.stats().event("f").unwrap().callback_names.is_empty());
    }

    #[test]
    fn test_fire_with_trace_dispatch() {
        let config = RegistryConfig {
            trace_dispatch: true,
            ..RegistryConfig::default()
        };
        let registry: EventRegistry<String> = EventRegistry::with_config(config);
        let log: Log = Arc::default();

        registry.register("greet", recording(&log, "A")).unwrap();
        registry
            .register_named("greet", "loud", recording(&log, "B"))
            .unwrap();

        registry.fire("greet", &"hi".to_string()).unwrap();

        assert!(registry.config().trace_dispatch);
        assert_eq!(*log.lock(), vec!["B:hi:greet", "A:hi:greet"]);
    }

    #[test]
    fn test_has_callback_unknown_event() {
        let registry: EventRegistry<String> = EventRegistry::new();
        assert_eq!(registry.has_callback("nope", "logger"), None);
    }

    #[test]
    fn test_clear_keeps_event_known() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        registry.register("greet", counting(&counter)).unwrap();

        registry.clear("greet");
        registry.fire("greet", &"hi".to_string()).unwrap();

        assert!(registry.exists("greet"));
        assert_eq!(registry.callbacks_for("greet"), Some(0));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_event_then_reregister() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        registry.register("greet", counting(&counter)).unwrap();

        registry.drop_event("greet");
        assert!(!registry.exists("greet"));

        registry.register("greet", counting(&counter)).unwrap();
        registry.fire("greet", &"hi".to_string()).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(registry.stats().event("greet").unwrap().fire_count, 1);
    }

    #[test]
    fn test_drop_all() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        registry.register("a", counting(&counter)).unwrap();
        registry.register("b", counting(&counter)).unwrap();

        registry.drop_all();

        assert!(!registry.exists("a"));
        assert!(!registry.exists("b"));
        assert!(registry.list_event_names().is_empty());
    }

    #[test]
    fn test_list_event_names_in_registration_order() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for name in ["zeta", "alpha", "mid", "alpha"] {
            registry.register(name, counting(&counter)).unwrap();
        }

        assert_eq!(registry.list_event_names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_chaining() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        registry.register("a", counting(&counter)).unwrap();
        registry.register("b", counting(&counter)).unwrap();

        registry
            .fire("a", &"x".to_string())
            .unwrap()
            .clear("a")
            .drop_event("b");

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(registry.exists("a"));
        assert!(!registry.exists("b"));
    }

    #[test]
    fn test_stats_track_fires() {
        let registry: EventRegistry<String> =
            EventRegistry::with_config(RegistryConfig::named("stats"));
        let counter = Arc::new(AtomicUsize::new(0));
        registry
            .register_named("greet", "counter", counting(&counter))
            .unwrap();
        registry.register("other", counting(&counter)).unwrap();

        registry.fire("greet", &"1".to_string()).unwrap();
        registry.fire("greet", &"2".to_string()).unwrap();

        let stats = registry.stats();
        assert_eq!(stats.registry_name, "stats");
        assert_eq!(stats.total_events, 2);
        assert_eq!(stats.total_callbacks, 2);
        assert_eq!(stats.total_fires, 2);

        let greet = stats.event("greet").unwrap();
        assert_eq!(greet.fire_count, 2);
        assert_eq!(greet.callback_names, vec!["counter"]);
        assert!(greet.last_fired_at.is_some());
        assert!(stats.event("other").unwrap().last_fired_at.is_none());
    }

    #[test]
    fn test_debug_output() {
        let registry: EventRegistry<String> = EventRegistry::new();
        let rendered = format!("{registry:?}");
        assert!(rendered.contains("EventRegistry"));
        assert!(rendered.contains("event_count: 0"));
    }

    #[test]
    fn test_callback_limit_only_warns() {
        let config = RegistryConfig {
            max_callbacks_per_event: 1,
            ..RegistryConfig::default()
        };
        let registry: EventRegistry<String> = EventRegistry::with_config(config);
        let counter = Arc::new(AtomicUsize::new(0));

        registry.register("busy", counting(&counter)).unwrap();
        registry.register("busy", counting(&counter)).unwrap();

        assert_eq!(registry.callbacks_for("busy"), Some(2));
    }
}
