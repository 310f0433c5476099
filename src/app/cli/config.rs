//! TOML configuration file parsing and loading
//!
//! This module handles loading and parsing of TOML configuration files,
//! including default config file discovery and validation of config values.
//! Values from the file only fill options the command line left unset.

use crate::app::error::{AppError, AppResult};
use crate::app::settings::{ContainerKind, ReportFormat};
use crate::core::logging::LogFormat;
use crate::core::validation::ValidationError;
use std::path::{Path, PathBuf};

use super::args::{Args, LOG_LEVELS};

/// Keys accepted in a configuration file
pub const CONFIG_KEYS: [&str; 11] = [
    "producers",
    "consumers",
    "items",
    "container",
    "capacity",
    "external-stop",
    "report",
    "log-level",
    "log-format",
    "log-file",
    "color",
];

/// Default configuration file location: `<config dir>/waitqueue/waitqueue.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("waitqueue").join("waitqueue.toml"))
}

impl Args {
    /// Load the configuration file named by `--config-file`, or the default one if present
    ///
    /// An explicitly named file must exist; a missing default file is not an
    /// error. Returns the path that was loaded, if any.
    pub fn load_config_file(&mut self) -> AppResult<Option<PathBuf>> {
        let config_path = match self.config_file.clone() {
            Some(path) => {
                // User specified a config file - it must exist
                if !path.exists() {
                    return Err(AppError::ConfigNotFound { path });
                }
                path
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(None), // No config file to load
            },
        };

        let config = read_config_table(&config_path)?;
        Self::apply_toml_values(self, &config)?;
        Ok(Some(config_path))
    }

    /// Apply TOML configuration values to every option that is still unset
    pub fn apply_toml_values(args: &mut Self, config: &toml::Table) -> Result<(), ValidationError> {
        if let Some(unknown) = config.keys().find(|key| !CONFIG_KEYS.contains(&key.as_str())) {
            return Err(ValidationError::new(format!(
                "Unknown configuration key '{}' (expected one of: {})",
                unknown,
                CONFIG_KEYS.join(", ")
            )));
        }

        fill(&mut args.producers, || positive_integer(config, "producers"))?;
        fill(&mut args.consumers, || positive_integer(config, "consumers"))?;
        fill(&mut args.items, || positive_integer(config, "items"))?;
        fill(&mut args.capacity, || positive_integer(config, "capacity"))?;

        fill(&mut args.container, || {
            choice(config, "container", &ContainerKind::NAMES)
        })?;
        fill(&mut args.report, || {
            choice(config, "report", &ReportFormat::NAMES)
        })?;
        fill(&mut args.log_level, || choice(config, "log-level", &LOG_LEVELS))?;
        fill(&mut args.log_format, || {
            choice(config, "log-format", &LogFormat::NAMES)
        })?;

        fill(&mut args.external_stop, || boolean(config, "external-stop"))?;
        fill(&mut args.color, || boolean(config, "color"))?;

        // Magic values "none" and "-" are resolved when the path is used
        fill(&mut args.log_file, || {
            string(config, "log-file").map(|value| value.map(PathBuf::from))
        })?;

        Ok(())
    }
}

fn read_config_table(path: &Path) -> AppResult<toml::Table> {
    let contents = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<toml::Table>(&contents).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Set `target` from the configuration only if the command line did not
fn fill<T, F>(target: &mut Option<T>, read: F) -> Result<(), ValidationError>
where
    F: FnOnce() -> Result<Option<T>, ValidationError>,
{
    if target.is_none() {
        *target = read()?;
    }
    Ok(())
}

fn positive_integer(config: &toml::Table, key: &str) -> Result<Option<usize>, ValidationError> {
    let Some(value) = config.get(key) else {
        return Ok(None);
    };
    value
        .as_integer()
        .filter(|number| *number > 0)
        .and_then(|number| usize::try_from(number).ok())
        .map(Some)
        .ok_or_else(|| {
            ValidationError::new(format!(
                "'{}' must be a positive integer (got {})",
                key, value
            ))
        })
}

fn string<'a>(config: &'a toml::Table, key: &str) -> Result<Option<&'a str>, ValidationError> {
    let Some(value) = config.get(key) else {
        return Ok(None);
    };
    value
        .as_str()
        .map(Some)
        .ok_or_else(|| ValidationError::new(format!("'{}' must be a string (got {})", key, value)))
}

fn choice(
    config: &toml::Table,
    key: &str,
    accepted: &[&str],
) -> Result<Option<String>, ValidationError> {
    let Some(value) = string(config, key)? else {
        return Ok(None);
    };
    let normalised = value.trim().to_lowercase();
    if accepted.contains(&normalised.as_str()) {
        Ok(Some(normalised))
    } else {
        Err(ValidationError::new(format!(
            "Invalid {} '{}' (expected one of: {})",
            key,
            value,
            accepted.join(", ")
        )))
    }
}

fn boolean(config: &toml::Table, key: &str) -> Result<Option<bool>, ValidationError> {
    let Some(value) = config.get(key) else {
        return Ok(None);
    };
    value
        .as_bool()
        .map(Some)
        .ok_or_else(|| ValidationError::new(format!("'{}' must be true or false (got {})", key, value)))
}
