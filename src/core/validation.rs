//! Validation utilities for demo settings
//!
//! Values reach the demo from the command line or a TOML file; both paths
//! funnel through these validators so the error wording is the same.

use std::fmt::Display;
use std::str::FromStr;

/// Error raised when a configuration value is out of range or malformed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Validate positive integer value
pub fn validate_positive_int(value: &str) -> Result<usize, ValidationError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ValidationError::new("Value must be greater than 0")),
        Ok(n) => Ok(n),
        Err(_) => Err(ValidationError::new(format!(
            "'{}' is not a valid positive integer",
            value
        ))),
    }
}

/// Validate a count against an inclusive upper bound
pub fn validate_count(field: &str, value: usize, max: usize) -> Result<usize, ValidationError> {
    if value == 0 {
        return Err(ValidationError::new(format!(
            "'{}' must be greater than 0",
            field
        )));
    }
    if value > max {
        return Err(ValidationError::new(format!(
            "'{}' must be at most {} (got {})",
            field, max, value
        )));
    }
    Ok(value)
}

/// Parse a named choice, listing the accepted names on failure
pub fn validate_choice<T>(field: &str, value: &str, accepted: &[&str]) -> Result<T, ValidationError>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().to_lowercase().parse::<T>().map_err(|_| {
        ValidationError::new(format!(
            "Invalid {} '{}' (expected one of: {})",
            field,
            value,
            accepted.join(", ")
        ))
    })
}
