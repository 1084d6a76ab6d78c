//! # Subscription Tokens
//!
//! Opaque handles returned by registration and used for later removal.
//!
//! A token pairs the owning registry's instance id with a sequence number drawn
//! from that registry's counter. Sequence numbers are never reused, including
//! across `drop_all`, so tokens from one registry cannot collide, and a token
//! minted by another registry never matches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Handle identifying one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionToken {
    registry_id: Uuid,
    sequence: u64,
}

impl SubscriptionToken {
    pub fn new(registry_id: Uuid, sequence: u64) -> Self {
        Self {
            registry_id,
            sequence,
        }
    }

    /// Id of the registry that minted this token
    pub fn registry_id(&self) -> Uuid {
        self.registry_id
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for SubscriptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.registry_id.simple(), self.sequence)
    }
}

/// Monotonic token source owned by a single registry
#[derive(Debug)]
pub(crate) struct TokenMinter {
    registry_id: Uuid,
    next: AtomicU64,
}

impl TokenMinter {
    pub(crate) fn new(registry_id: Uuid) -> Self {
        Self {
            registry_id,
            next: AtomicU64::new(1),
        }
    }

    pub(crate) fn mint(&self) -> SubscriptionToken {
        let sequence = self.next.fetch_add(1, Ordering::Relaxed);
        SubscriptionToken::new(self.registry_id, sequence)
    }
}
