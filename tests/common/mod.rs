//! Shared helpers for registry integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use tasker_events::{CallbackError, Listener};

/// One observed callback invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub label: String,
    pub data: String,
    pub event: String,
}

/// Records every invocation made through the callbacks it hands out
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback that records `label` with the data and event it receives
    pub fn callback(
        &self,
        label: &str,
    ) -> impl Fn(&String, &str) -> Result<(), CallbackError> + Send + Sync + 'static {
        let calls = self.calls.clone();
        let label = label.to_string();
        move |data: &String, event: &str| {
            calls.lock().push(Call {
                label: label.clone(),
                data: data.clone(),
                event: event.to_string(),
            });
            Ok(())
        }
    }

    /// Named listener that records `label`
    pub fn named(&self, name: &str, label: &str) -> Listener<String> {
        Listener::named(name, self.callback(label))
    }

    /// Anonymous listener that records `label`
    pub fn anonymous(&self, label: &str) -> Listener<String> {
        Listener::new(self.callback(label))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Labels in invocation order
    pub fn labels(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.label.clone()).collect()
    }

    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

pub fn data(value: &str) -> String {
    value.to_string()
}
