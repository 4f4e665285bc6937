//! Agent backed by an external program

use super::Agent;
use crate::config::AgentConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Runs an external program as the agent, with `AGENT_PORT` and
/// `AGENT_TIMEOUT` exported into its environment.
///
/// The child is killed if the run is dropped, e.g. on Ctrl-C.
#[derive(Debug, Clone)]
pub struct CommandAgent {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandAgent {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl Agent for CommandAgent {
    fn name(&self) -> &str {
        &self.program
    }

    async fn run(&self, config: &AgentConfig) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(config.env_pairs())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!("Spawning agent: {} {:?}", self.program, self.args);
        let status = cmd
            .status()
            .await
            .map_err(|e| Error::Agent(format!("Failed to start '{}': {}", self.program, e)))?;

        if !status.success() {
            return Err(Error::Agent(format!(
                "'{}' exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_exports_normalized_env() {
        let agent = CommandAgent::new("sh").with_args([
            "-c",
            r#"test "$AGENT_PORT" = 9090 && test "$AGENT_TIMEOUT" = 12"#,
        ]);
        let config = AgentConfig {
            port: 9090,
            timeout: Duration::from_secs(12),
        };
        agent.run(&config).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_error() {
        let agent = CommandAgent::new("sh").with_args(["-c", "exit 3"]);
        let err = agent.run(&AgentConfig::default()).await.unwrap_err();
        assert!(matches!(err, Error::Agent(ref msg) if msg.contains("exited with")));
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let agent = CommandAgent::new("/nonexistent/agent-binary-4b1c");
        let err = agent.run(&AgentConfig::default()).await.unwrap_err();
        assert!(matches!(err, Error::Agent(ref msg) if msg.starts_with("Failed to start")));
    }

    #[tokio::test]
    async fn test_working_dir_is_applied() {
        // pwd -P resolves symlinks, so compare against the canonical path
        let dir = std::fs::canonicalize(std::env::temp_dir()).unwrap();
        let script = format!(r#"test "$(pwd -P)" = "{}""#, dir.display());
        let agent = CommandAgent::new("sh")
            .with_args(["-c".to_string(), script])
            .with_working_dir(&dir);
        agent.run(&AgentConfig::default()).await.unwrap();
    }
}
