//! Agent launcher
//!
//! The agent itself lives outside this crate. This module exports the
//! normalized [`AgentConfig`] to it, runs it on the tokio runtime and
//! stops cleanly on Ctrl-C.

mod command;

pub use command::CommandAgent;

use crate::config::AgentConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;
use tracing::{debug, info, warn};

/// Environment variable naming the agent program when none is given on the CLI
pub const AGENT_COMMAND_ENV: &str = "AGENT_COMMAND";

/// Something that can be run as the agent process
#[async_trait]
pub trait Agent: Send + Sync {
    /// Human readable name for log lines
    fn name(&self) -> &str;

    /// Run until the agent finishes on its own
    async fn run(&self, config: &AgentConfig) -> Result<()>;
}

/// How an agent run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Interrupted,
}

/// Run `agent` until it completes or the user presses Ctrl-C
pub async fn run_agent<A: Agent + ?Sized>(agent: &A, config: &AgentConfig) -> Result<RunOutcome> {
    run_agent_until(agent, config, ctrl_c()).await
}

/// Run `agent` until it completes or `interrupt` resolves.
///
/// The agent future is dropped on interrupt.
pub async fn run_agent_until<A, F>(
    agent: &A,
    config: &AgentConfig,
    interrupt: F,
) -> Result<RunOutcome>
where
    A: Agent + ?Sized,
    F: Future<Output = ()>,
{
    info!(
        "Starting agent '{}' (port {}, timeout {}s)",
        agent.name(),
        config.port,
        config.timeout.as_secs()
    );

    tokio::select! {
        result = agent.run(config) => {
            result?;
            debug!("Agent '{}' finished", agent.name());
            Ok(RunOutcome::Completed)
        }
        () = interrupt => {
            info!("Agent execution stopped by user.");
            Ok(RunOutcome::Interrupted)
        }
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testing::LogCapture;
    use std::sync::atomic::{AtomicU16, Ordering};
    use std::time::Duration;

    struct RecordingAgent {
        seen_port: AtomicU16,
        fail: bool,
    }

    #[async_trait]
    impl Agent for RecordingAgent {
        fn name(&self) -> &str {
            "recording"
        }

        async fn run(&self, config: &AgentConfig) -> Result<()> {
            self.seen_port.store(config.port, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Agent("agent crashed".to_string()));
            }
            Ok(())
        }
    }

    struct ForeverAgent;

    #[async_trait]
    impl Agent for ForeverAgent {
        fn name(&self) -> &str {
            "forever"
        }

        async fn run(&self, _config: &AgentConfig) -> Result<()> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_completed_run_receives_config() {
        let agent = RecordingAgent {
            seen_port: AtomicU16::new(0),
            fail: false,
        };
        let config = AgentConfig {
            port: 9191,
            timeout: Duration::from_secs(5),
        };

        let outcome = run_agent_until(&agent, &config, std::future::pending())
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(agent.seen_port.load(Ordering::SeqCst), 9191);
    }

    #[tokio::test]
    async fn test_agent_error_propagates() {
        let agent = RecordingAgent {
            seen_port: AtomicU16::new(0),
            fail: true,
        };
        let result =
            run_agent_until(&agent, &AgentConfig::default(), std::future::pending()).await;
        assert!(matches!(result, Err(Error::Agent(_))));
    }

    #[tokio::test]
    async fn test_interrupt_stops_agent() {
        let logs = LogCapture::new();
        let _guard = logs.set_default();

        let outcome = run_agent_until(&ForeverAgent, &AgentConfig::default(), async {})
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Interrupted);
        assert!(logs.contents().contains("Agent execution stopped by user."));
    }
}
