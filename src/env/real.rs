//! Process environment implementation

use super::traits::EnvSource;

/// Reads the real process environment
#[derive(Debug, Clone, Default)]
pub struct RealEnv;

impl RealEnv {
    pub fn new() -> Self {
        Self
    }
}

impl EnvSource for RealEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
