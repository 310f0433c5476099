//! Tests for the CLI module
//!
//! Argument parsing and configuration file handling, kept apart from the
//! modules they exercise.
