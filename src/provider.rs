use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::{AdminError, Result};

/// Resolves a session identity to a live connection handle.
pub trait InstanceProvider<B: ?Sized>: Send + Sync {
    fn instance(&self, session_key: &str) -> Result<Arc<B>>;
}

/// Provider holding one connection handle per session key.
///
/// Handles are shared, not owned per call: every registry built for the same
/// key talks through the same handle.
pub struct SessionInstanceProvider<B: ?Sized> {
    instances: RwLock<HashMap<String, Arc<B>>>,
}

impl<B: ?Sized> Default for SessionInstanceProvider<B> {
    fn default() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }
}

impl<B: ?Sized + Send + Sync> SessionInstanceProvider<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle for a session, returning the one it replaces.
    pub fn register(&self, session_key: impl Into<String>, instance: Arc<B>) -> Option<Arc<B>> {
        let session_key = session_key.into();
        debug!(session = %session_key, "registering connection");
        self.instances.write().insert(session_key, instance)
    }

    pub fn remove(&self, session_key: &str) -> Option<Arc<B>> {
        self.instances.write().remove(session_key)
    }

    pub fn session_keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.instances.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl<B: ?Sized + Send + Sync> InstanceProvider<B> for SessionInstanceProvider<B> {
    fn instance(&self, session_key: &str) -> Result<Arc<B>> {
        self.instances
            .read()
            .get(session_key)
            .cloned()
            .ok_or_else(|| {
                AdminError::Connection(format!(
                    "no connection registered for session [{session_key}]"
                ))
            })
    }
}
