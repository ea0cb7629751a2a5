//! Shared utilities for the netprofile workspace.
//!
//! Holds the error type every crate converts into at its boundary and the
//! `tracing` subscriber setup used by binaries.

pub mod error;
pub mod logging;

pub use error::NetprofileError;
pub use logging::{init_logging, init_logging_with_level, LogLevel};
