//! CLI handling
//!
//! - Argument parsing structures
//! - Command routing
//! - Log level selection

pub mod args;
pub mod help;
pub mod router;

pub use args::{Cli, Commands};
pub use help::get_log_level;
pub use router::execute_command;
