//! In-memory environment for tests

use super::traits::EnvSource;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock environment backed by a shared map
///
/// Clones share the same variables.
///
/// # Examples
///
/// ```
/// use addnums::env::{EnvSource, MockEnv};
///
/// let env = MockEnv::new().with_var("AGENT_TIMEOUT", "60");
/// assert_eq!(env.var("AGENT_TIMEOUT").as_deref(), Some("60"));
/// assert_eq!(env.var("AGENT_PORT"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: Arc<Mutex<HashMap<String, String>>>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MockEnv::set`]
    pub fn with_var(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a variable
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.vars
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), value.into());
    }

    /// Remove a variable
    pub fn remove(&self, key: &str) {
        self.vars
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
    }
}

impl EnvSource for MockEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}
