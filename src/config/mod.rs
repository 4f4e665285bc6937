//! Runtime configuration read from environment variables

pub mod agent;

pub use agent::{
    AgentConfig, AGENT_PORT_ENV, AGENT_TIMEOUT_ENV, DEFAULT_AGENT_PORT, DEFAULT_AGENT_TIMEOUT_SECS,
};
