//! CLI Integration Test Modules

pub mod argument_parsing;
pub mod binary_runs;
pub mod toml_config;
