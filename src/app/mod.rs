//! Application module
//!
//! The `waitqueue` binary: resolves settings from the command line and an
//! optional TOML file, then runs a producer/consumer exchange over a
//! [`WaitQueue`](crate::queue::WaitQueue) and reports what arrived.

pub mod cli;
pub mod demo;
pub mod error;
pub mod settings;
pub mod startup;
