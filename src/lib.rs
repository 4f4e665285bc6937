//! # addnums
//!
//! Correlation-aware addition of loosely typed numbers, plus two small
//! operational tools that ship alongside it.
//!
//! ## Usage
//!
//! ```bash
//! addnums add <NUM1> <NUM2> [--correlation-id ID]
//! addnums demo
//! addnums agent [PROGRAM] [ARGS...]
//! addnums jira-status --server URL [--email E] [--secret NAME]
//! ```
//!
//! ## Modules
//!
//! - `add` - Operand coercion and `add_two_numbers` with correlation-ID logging
//! - `agent` - Agent launcher with Ctrl-C handling
//! - `cli` - Argument parsing and command routing
//! - `config` - `AGENT_PORT` / `AGENT_TIMEOUT` loading with validated defaults
//! - `demo` - Edge-case walkthrough of the addition helper
//! - `env` - Environment variable abstraction for testing
//! - `error` - Crate-wide error type
//! - `jira` - JIRA availability and credential check
//! - `testing` - Log capture for tests
pub mod add;
pub mod agent;
pub mod cli;
pub mod config;
pub mod demo;
pub mod env;
pub mod error;
pub mod jira;

pub mod testing;
