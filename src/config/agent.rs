//! Agent launcher settings
//!
//! `AGENT_PORT` and `AGENT_TIMEOUT` are optional integers. A value that
//! does not parse is reported with a warning and replaced by its default;
//! it never aborts startup.

use crate::env::{EnvSource, RealEnv};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

pub const AGENT_PORT_ENV: &str = "AGENT_PORT";
pub const AGENT_TIMEOUT_ENV: &str = "AGENT_TIMEOUT";

pub const DEFAULT_AGENT_PORT: u16 = 8080;
pub const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 300;

/// Settings exported to the agent process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub port: u16,
    pub timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_AGENT_PORT,
            timeout: Duration::from_secs(DEFAULT_AGENT_TIMEOUT_SECS),
        }
    }
}

impl AgentConfig {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::load(&RealEnv::new())
    }

    /// Load from an environment source, falling back to defaults
    pub fn load<E: EnvSource + ?Sized>(env: &E) -> Self {
        let port = read_integer(env, AGENT_PORT_ENV, DEFAULT_AGENT_PORT, |port| *port != 0);
        let timeout_secs =
            read_integer(env, AGENT_TIMEOUT_ENV, DEFAULT_AGENT_TIMEOUT_SECS, |_| true);

        let config = Self {
            port,
            timeout: Duration::from_secs(timeout_secs),
        };
        debug!("Loaded agent configuration: {:?}", config);
        config
    }

    /// Normalized variables to export to the agent
    pub fn env_pairs(&self) -> [(&'static str, String); 2] {
        [
            (AGENT_PORT_ENV, self.port.to_string()),
            (AGENT_TIMEOUT_ENV, self.timeout.as_secs().to_string()),
        ]
    }
}

fn read_integer<E, T>(env: &E, name: &str, default: T, accept: impl Fn(&T) -> bool) -> T
where
    E: EnvSource + ?Sized,
    T: FromStr + Display + Copy,
{
    let Some(raw) = env.var(name) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if accept(&value) => value,
        _ => {
            warn!(
                "Environment variable '{}' has an invalid integer value '{}'. Using default value '{}'.",
                name,
                raw.escape_debug(),
                default
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnv;
    use crate::testing::LogCapture;

    #[test]
    fn test_defaults_when_unset() {
        let config = AgentConfig::load(&MockEnv::new());
        assert_eq!(config, AgentConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_valid_values() {
        let env = MockEnv::new()
            .with_var(AGENT_PORT_ENV, "9090")
            .with_var(AGENT_TIMEOUT_ENV, " 45 ");
        let config = AgentConfig::load(&env);
        assert_eq!(config.port, 9090);
        assert_eq!(config.timeout, Duration::from_secs(45));
    }

    #[test]
    fn test_invalid_value_warns_and_defaults() {
        let env = MockEnv::new().with_var(AGENT_PORT_ENV, "abc");
        let logs = LogCapture::new();
        let config = logs.capture(|| AgentConfig::load(&env));

        assert_eq!(config.port, DEFAULT_AGENT_PORT);
        let contents = logs.contents();
        assert!(contents.contains("WARN"));
        assert!(contents.contains(
            "Environment variable 'AGENT_PORT' has an invalid integer value 'abc'. Using default value '8080'."
        ));
    }

    #[test]
    fn test_out_of_range_values_default() {
        let env = MockEnv::new()
            .with_var(AGENT_PORT_ENV, "70000")
            .with_var(AGENT_TIMEOUT_ENV, "-5");
        let config = AgentConfig::load(&env);
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn test_port_zero_is_rejected() {
        let env = MockEnv::new().with_var(AGENT_PORT_ENV, "0");
        assert_eq!(AgentConfig::load(&env).port, DEFAULT_AGENT_PORT);
    }

    #[test]
    fn test_env_pairs_are_normalized() {
        let env = MockEnv::new().with_var(AGENT_TIMEOUT_ENV, "+60");
        let pairs = AgentConfig::load(&env).env_pairs();
        assert_eq!(
            pairs,
            [
                ("AGENT_PORT", "8080".to_string()),
                ("AGENT_TIMEOUT", "60".to_string())
            ]
        );
    }
}
