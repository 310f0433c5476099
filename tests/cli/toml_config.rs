//! CLI TOML configuration tests
//!
//! Configuration files fill options the command line leaves unset.

use clap::Parser;
use std::io::Write;
use waitqueue::app::cli::Args;
use waitqueue::app::error::AppError;
use waitqueue::app::settings::{ContainerKind, DemoSettings};

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_config_file_merges_under_command_line() {
    let file = config_file("producers = 5\nconsumers = 2\ncontainer = \"circular\"\ncapacity = 32\n");
    let path = file.path().to_string_lossy().into_owned();

    let mut args =
        Args::try_parse_from(["waitqueue", "--config-file", path.as_str(), "--producers", "1"]).unwrap();
    args.load_config_file().unwrap();
    let settings = DemoSettings::from_args(&args).unwrap();

    assert_eq!(settings.producers, 1, "command line wins");
    assert_eq!(settings.consumers, 2, "config fills the gap");
    assert_eq!(settings.container, ContainerKind::Circular);
    assert_eq!(settings.capacity, Some(32));
}

#[test]
fn test_config_file_with_unknown_key_fails() {
    let file = config_file("threads = 3\n");
    let path = file.path().to_string_lossy().into_owned();

    let mut args = Args::try_parse_from(["waitqueue", "-c", path.as_str()]).unwrap();
    match args.load_config_file() {
        Err(AppError::Validation(error)) => {
            assert!(error.message().contains("'threads'"));
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_config_file_value_from_toml_table() {
    let mut args = Args::default();
    let mut config = toml::Table::new();
    config.insert("items".to_string(), toml::Value::Integer(12));
    config.insert("external-stop".to_string(), toml::Value::Boolean(true));

    Args::apply_toml_values(&mut args, &config).unwrap();

    assert_eq!(args.items, Some(12));
    assert_eq!(args.external_stop, Some(true));
}
