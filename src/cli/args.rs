//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

/// Correlation-aware addition, agent launcher and JIRA status check
#[derive(Parser)]
#[command(name = "addnums")]
#[command(about = "addnums - correlation-aware addition, agent launcher and JIRA status check", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add two numbers, logging each step under a correlation ID
    #[command(allow_negative_numbers = true)]
    Add {
        /// First value (integer, decimal or exponent form)
        num1: String,

        /// Second value (integer, decimal or exponent form)
        num2: String,

        /// Correlation ID for log lines; an empty string disables the prefix
        #[arg(short = 'c', long, value_name = "ID")]
        correlation_id: Option<String>,
    },

    /// Show the log output of the addition for a set of edge cases
    Demo,

    /// Launch the agent with AGENT_PORT and AGENT_TIMEOUT applied
    Agent {
        /// Agent program to run
        #[arg(env = "AGENT_COMMAND")]
        program: Option<String>,

        /// Arguments passed through to the agent
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,

        /// Working directory for the agent
        #[arg(short = 'C', long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Check JIRA availability and credentials
    #[command(name = "jira-status")]
    JiraStatus {
        /// JIRA site URL
        #[arg(long, env = "JIRA_SERVER", value_name = "URL")]
        server: Url,

        /// Account email used for the authenticated check
        #[arg(long, env = "JIRA_USER_EMAIL")]
        email: Option<String>,

        /// API key given directly instead of through Secret Manager
        #[arg(long, env = "JIRA_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Secret Manager secret holding the API key
        /// (projects/<project>/secrets/<secret>[/versions/<version>])
        #[arg(long, env = "JIRA_API_KEY_SECRET", value_name = "NAME")]
        secret: Option<String>,

        /// Override the Secret Manager API endpoint
        #[arg(long, value_name = "URL")]
        secret_endpoint: Option<Url>,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,
    },
}
