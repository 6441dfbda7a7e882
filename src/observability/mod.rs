//! Optional tracing setup for hosts and tests.
//!
//! All instrumentation in the crate goes through `tracing` macros; this
//! module only provides a convenience subscriber for processes that have not
//! installed their own.

pub mod init;

pub use init::init_tracing;
