//! Command routing and execution
//!
//! Each handler returns the process exit code.

use crate::add::add_two_numbers;
use crate::agent::{run_agent, CommandAgent, RunOutcome, AGENT_COMMAND_ENV};
use crate::cli::args::Commands;
use crate::config::AgentConfig;
use crate::demo::{run_demo, scenarios};
use crate::env::RealEnv;
use crate::jira::{
    run_status_check, JiraSettings, SecretManagerSecret, SecretSource, StaticSecret, TokenSource,
};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(command: Commands) -> Result<i32> {
    match command {
        Commands::Add {
            num1,
            num2,
            correlation_id,
        } => run_add(num1, num2, correlation_id),
        Commands::Demo => run_demo_command(),
        Commands::Agent { program, args, dir } => run_agent_command(program, args, dir).await,
        Commands::JiraStatus {
            server,
            email,
            api_key,
            secret,
            secret_endpoint,
            timeout,
        } => {
            run_jira_status(JiraStatusParams {
                server,
                email,
                api_key,
                secret,
                secret_endpoint,
                timeout,
            })
            .await
        }
    }
}

fn run_add(num1: String, num2: String, correlation_id: Option<String>) -> Result<i32> {
    match add_two_numbers(num1, num2, correlation_id.as_deref()) {
        Ok(sum) => {
            println!("{sum}");
            Ok(0)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(1)
        }
    }
}

fn run_demo_command() -> Result<i32> {
    let mut stdout = io::stdout();
    let summary = run_demo(&scenarios(), &mut stdout)?;
    debug!(
        "Demo finished: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    );
    Ok(0)
}

async fn run_agent_command(
    program: Option<String>,
    args: Vec<String>,
    dir: Option<PathBuf>,
) -> Result<i32> {
    let program = program.with_context(|| {
        format!("No agent program given (pass PROGRAM or set {AGENT_COMMAND_ENV})")
    })?;

    let mut agent = CommandAgent::new(program).with_args(args);
    if let Some(dir) = dir {
        agent = agent.with_working_dir(dir);
    }

    let config = AgentConfig::from_env();
    match run_agent(&agent, &config).await? {
        RunOutcome::Completed => debug!("Agent completed"),
        RunOutcome::Interrupted => debug!("Agent interrupted"),
    }
    Ok(0)
}

struct JiraStatusParams {
    server: Url,
    email: Option<String>,
    api_key: Option<String>,
    secret: Option<String>,
    secret_endpoint: Option<Url>,
    timeout: u64,
}

async fn run_jira_status(params: JiraStatusParams) -> Result<i32> {
    let timeout = Duration::from_secs(params.timeout);
    let mut settings = JiraSettings::new(params.server).with_timeout(timeout);
    if let Some(email) = params.email {
        settings = settings.with_user_email(email);
    }

    let secret: Option<Box<dyn SecretSource>> = match (params.api_key, params.secret) {
        (Some(key), _) => Some(Box::new(StaticSecret::new(key))),
        (None, Some(name)) => {
            let token = TokenSource::from_env(&RealEnv::new())?;
            let mut source = SecretManagerSecret::new(&name, token, timeout)?;
            if let Some(endpoint) = params.secret_endpoint {
                source = source.with_endpoint(endpoint);
            }
            Some(Box::new(source))
        }
        (None, None) => None,
    };

    let mut stdout = io::stdout();
    let report = run_status_check(&settings, secret.as_deref(), &mut stdout).await?;
    stdout.flush()?;
    Ok(report.exit_code())
}
