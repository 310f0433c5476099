//! Command-line arguments for the demo binary
//!
//! Every option is an `Option` so a configuration file can fill in whatever
//! the command line leaves unset. Defaults are applied later, when the
//! arguments are resolved into [`DemoSettings`](crate::app::settings::DemoSettings).

use crate::app::settings::{ContainerKind, ReportFormat};
use crate::core::logging::LogFormat;
use crate::core::validation::validate_positive_int;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Accepted log levels, shared with configuration file validation
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "waitqueue")]
#[command(about = "Exchange values between producer and consumer threads over a blocking wait queue")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Number of producer threads
    #[arg(short = 'p', long = "producers", value_name = "COUNT", value_parser = validate_positive_int)]
    pub producers: Option<usize>,

    /// Number of consumer threads
    #[arg(short = 'n', long = "consumers", value_name = "COUNT", value_parser = validate_positive_int)]
    pub consumers: Option<usize>,

    /// Values pushed by each producer
    #[arg(short = 'i', long = "items", value_name = "COUNT", value_parser = validate_positive_int)]
    pub items: Option<usize>,

    /// Element container backing the queue
    #[arg(short = 't', long = "container", value_name = "KIND", value_parser = ContainerKind::NAMES)]
    pub container: Option<String>,

    /// Capacity of a ring or circular container (oldest values are overwritten when full)
    #[arg(short = 'k', long = "capacity", value_name = "COUNT", value_parser = validate_positive_int)]
    pub capacity: Option<usize>,

    /// Stop the queue through an external stop source instead of the queue's own
    #[arg(
        short = 'x',
        long = "external-stop",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub external_stop: Option<bool>,

    /// Report format
    #[arg(short = 'r', long = "report", value_name = "FORMAT", value_parser = ReportFormat::NAMES)]
    pub report: Option<String>,

    /// Color output control: --color or --color true forces it on, --color false
    /// turns it off, unspecified follows the terminal
    #[arg(
        short = 'g',
        long = "color",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub color: Option<bool>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = LOG_LEVELS)]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = LogFormat::NAMES)]
    pub log_format: Option<String>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from an explicit argument list (the first item is the program name)
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// Whether output should be colored: explicit setting, else stdout is a terminal
    pub fn use_color(&self) -> bool {
        self.color
            .unwrap_or_else(|| std::io::stdout().is_terminal())
    }

    /// Log file as a string, with the magic values 'none' and '-' meaning no file
    pub fn log_file_path(&self) -> Option<String> {
        let path = self.log_file.as_ref()?.to_string_lossy();
        if path.eq_ignore_ascii_case("none") || path == "-" {
            None
        } else {
            Some(path.into_owned())
        }
    }
}
