//! Callback types accepted by the event registry.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Callback invoked when an event fires
///
/// Receives the fired data and the name of the event. Returning `Err` aborts the
/// remaining callbacks of that `fire` call.
pub type Callback<D> = Arc<dyn Fn(&D, &str) -> Result<(), CallbackError> + Send + Sync>;

/// Errors a callback can report back through `fire`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackError {
    #[error("Callback failed: {reason}")]
    Failed { reason: String },

    #[error("Callback error: {0}")]
    Generic(String),
}

impl CallbackError {
    pub fn failed(reason: impl Into<String>) -> Self {
        CallbackError::Failed {
            reason: reason.into(),
        }
    }
}

/// A callback plus the optional name it can later be addressed by
pub struct Listener<D> {
    pub(crate) name: Option<String>,
    pub(crate) callback: Callback<D>,
}

impl<D> Listener<D> {
    /// Anonymous listener, removable only by token
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&D, &str) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self {
            name: None,
            callback: Arc::new(callback),
        }
    }

    /// Listener that can also be removed or queried by `name`
    ///
    /// A blank `name` gives an anonymous listener.
    pub fn named<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&D, &str) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self::from_callback(Some(name.into()), Arc::new(callback))
    }

    /// Wrap an already shared callback
    pub fn from_callback(name: Option<String>, callback: Callback<D>) -> Self {
        Self {
            name: name.filter(|name| !name.trim().is_empty()),
            callback,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }
}

impl<D> Clone for Listener<D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<D> fmt::Debug for Listener<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("name", &self.name)
            .field("callback", &"<Callback>")
            .finish()
    }
}

/// Value side of a batch registration entry
#[derive(Debug, Clone)]
pub enum CallbackSet<D> {
    Single(Listener<D>),
    Multiple(Vec<Listener<D>>),
}

impl<D> CallbackSet<D> {
    pub fn len(&self) -> usize {
        match self {
            CallbackSet::Single(_) => 1,
            CallbackSet::Multiple(listeners) => listeners.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn listeners(&self) -> &[Listener<D>] {
        match self {
            CallbackSet::Single(listener) => std::slice::from_ref(listener),
            CallbackSet::Multiple(listeners) => listeners,
        }
    }

    pub fn into_listeners(self) -> Vec<Listener<D>> {
        match self {
            CallbackSet::Single(listener) => vec![listener],
            CallbackSet::Multiple(listeners) => listeners,
        }
    }
}

impl<D> From<Listener<D>> for CallbackSet<D> {
    fn from(listener: Listener<D>) -> Self {
        CallbackSet::Single(listener)
    }
}

impl<D> From<Vec<Listener<D>>> for CallbackSet<D> {
    fn from(listeners: Vec<Listener<D>>) -> Self {
        CallbackSet::Multiple(listeners)
    }
}
