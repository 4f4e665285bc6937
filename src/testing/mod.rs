//! Testing utilities
//!
//! Helpers shared by unit and integration tests. [`LogCapture`] records
//! `tracing` output so tests can assert on exact log lines.

mod log_capture;

pub use log_capture::{CaptureWriter, LogCapture};
