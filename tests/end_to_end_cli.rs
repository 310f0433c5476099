//! CLI Integration Tests
//!
//! Tests are organized by functionality:
//! - `cli::argument_parsing` - argument parsing through the public `Args` type
//! - `cli::toml_config` - configuration files and their precedence
//! - `cli::binary_runs` - the built binary end to end

mod cli;
mod common;
