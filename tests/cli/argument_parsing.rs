//! Core CLI argument parsing tests

use clap::Parser;
use waitqueue::app::cli::Args;
use waitqueue::app::settings::{ContainerKind, DemoSettings, ReportFormat};

#[test]
fn test_full_argument_set_resolves_to_settings() {
    let args = Args::try_parse_from([
        "waitqueue",
        "--producers",
        "2",
        "--consumers",
        "3",
        "--items",
        "25",
        "--container",
        "ring",
        "--capacity",
        "10",
        "--external-stop",
        "--report",
        "json",
    ])
    .unwrap();

    let settings = DemoSettings::from_args(&args).unwrap();
    assert_eq!(
        settings,
        DemoSettings {
            producers: 2,
            consumers: 3,
            items: 25,
            container: ContainerKind::Ring,
            capacity: Some(10),
            external_stop: true,
            report: ReportFormat::Json,
        }
    );
}

#[test]
fn test_short_options() {
    let args =
        Args::try_parse_from(["waitqueue", "-p", "1", "-n", "1", "-i", "5", "-t", "circular"])
            .unwrap();

    assert_eq!(args.producers, Some(1));
    assert_eq!(args.consumers, Some(1));
    assert_eq!(args.items, Some(5));
    assert_eq!(args.container.as_deref(), Some("circular"));
}

#[test]
fn test_unknown_option_is_rejected() {
    assert!(Args::try_parse_from(["waitqueue", "--workers", "4"]).is_err());
}

#[test]
fn test_version_flag_is_available() {
    let error = Args::try_parse_from(["waitqueue", "--version"]).unwrap_err();
    assert_eq!(error.kind(), clap::error::ErrorKind::DisplayVersion);
}
