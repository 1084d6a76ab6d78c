//! Point-in-time statistics about a registry.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Statistics about the whole registry
#[derive(Debug, Clone, Serialize)]
pub struct RegistryStats {
    pub registry_id: Uuid,
    pub registry_name: String,
    pub total_events: usize,
    pub total_callbacks: usize,
    pub total_fires: u64,
    /// Per-event details in first-registration order
    pub events: Vec<EventStats>,
}

/// Details about a specific event
#[derive(Debug, Clone, Serialize)]
pub struct EventStats {
    pub event_name: String,
    pub callback_count: usize,
    pub callback_names: Vec<String>,
    pub fire_count: u64,
    pub last_fired_at: Option<DateTime<Utc>>,
}

impl RegistryStats {
    pub fn event(&self, event_name: &str) -> Option<&EventStats> {
        self.events.iter().find(|e| e.event_name == event_name)
    }
}
