//! Application startup
//!
//! Parse arguments, merge the configuration file, initialise logging, run the
//! demo and print its report.

use crate::app::cli::Args;
use crate::app::demo::run_demo;
use crate::app::error::{AppError, AppResult};
use crate::app::settings::{DemoSettings, ReportFormat};
use crate::core::logging::{init_logging, logging_initialized, reconfigure_logging};
use crate::core::version;
use clap::Parser;

/// Initialize application startup
pub fn startup() {
    if let Err(error) = run(Args::parse()) {
        log::error!("{}", error);
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}

/// Run the binary with already parsed command-line arguments
pub fn run(mut args: Args) -> AppResult<()> {
    let config_path = args.load_config_file()?;

    let use_color = args.use_color();
    colored::control::set_override(use_color);
    let log_file = args.log_file_path();
    // A logger from an earlier run in this process keeps its format and file
    let logging = if logging_initialized() {
        reconfigure_logging(args.log_level.as_deref().unwrap_or("info"))
    } else {
        init_logging(
            args.log_level.as_deref(),
            args.log_format.as_deref(),
            log_file.as_deref(),
            use_color,
        )
    };
    logging.map_err(|e| AppError::Logging {
        message: e.to_string(),
    })?;

    log::info!(
        "waitqueue {} ({}) built {}",
        version::version(),
        version::git_hash(),
        version::build_time()
    );
    if let Some(path) = config_path {
        log::debug!("Loaded configuration from {}", path.display());
    }

    let settings = DemoSettings::from_args(&args)?;
    log::debug!("Resolved settings: {:?}", settings);

    let report = run_demo(&settings)?;
    if !report.is_consistent() {
        log::warn!("Report is inconsistent: {:?}", report);
    }

    let output = match settings.report {
        ReportFormat::Text => report.render_text(use_color),
        ReportFormat::Json => report.render_json()?,
    };
    println!("{}", output);
    Ok(())
}
