//! Common test utilities and helpers
//!
//! Runs the built binary in an isolated configuration directory so a user's
//! own `waitqueue.toml` never leaks into a test.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Run the `waitqueue` binary with `args`, using `config_home` as the configuration root
pub fn run_waitqueue(args: &[&str], config_home: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_waitqueue"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run waitqueue binary")
}

/// Write a configuration file named `name` into `dir`
pub fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write config file");
    path
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
