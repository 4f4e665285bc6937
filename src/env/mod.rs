//! Environment abstraction for configuration lookups
//!
//! Configuration code reads variables through [`EnvSource`] instead of
//! `std::env` directly, so tests can supply values without touching the
//! process environment.
//!
//! # Usage
//!
//! ## Production Code
//!
//! ```
//! use addnums::env::{EnvSource, RealEnv};
//!
//! let env = RealEnv::new();
//! let _port = env.var("AGENT_PORT");
//! ```
//!
//! ## Testing
//!
//! ```
//! use addnums::env::{EnvSource, MockEnv};
//!
//! let env = MockEnv::new();
//! env.set("AGENT_PORT", "9090");
//! assert_eq!(env.var("AGENT_PORT").as_deref(), Some("9090"));
//! ```

mod mock;
mod real;
mod traits;

pub use mock::MockEnv;
pub use real::RealEnv;
pub use traits::EnvSource;
