//! End-to-end runs of the built binary

use crate::common::{run_waitqueue, stderr_of, stdout_of, write_config};

#[test]
fn test_json_report_for_default_container() {
    let home = tempfile::tempdir().unwrap();
    let output = run_waitqueue(
        &["-p", "3", "-n", "2", "-i", "50", "--report", "json", "-l", "off"],
        home.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let report: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(report["container"], "deque");
    assert_eq!(report["pushed"], 150);
    assert_eq!(report["received"], 150);
    assert_eq!(report["distinct"], 150);
    assert_eq!(report["overwritten"], 0);
}

#[test]
fn test_text_report_with_external_stop() {
    let home = tempfile::tempdir().unwrap();
    let output = run_waitqueue(
        &["-i", "20", "--container", "ring", "--external-stop", "--color", "false", "-l", "off"],
        home.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("external"));
    assert!(stdout.contains("Result: consistent"));
}

// dirs only honours XDG_CONFIG_HOME on Linux
#[cfg(target_os = "linux")]
#[test]
fn test_default_config_file_is_discovered() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join("waitqueue");
    std::fs::create_dir_all(&config_dir).unwrap();
    write_config(
        &config_dir,
        "waitqueue.toml",
        "producers = 2\nitems = 7\nreport = \"json\"\nlog-level = \"off\"\n",
    );

    let output = run_waitqueue(&[], home.path());

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let report: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(report["pushed"], 14);
}

#[test]
fn test_missing_config_file_exits_with_error() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("missing.toml");
    let output = run_waitqueue(&["-c", missing.to_str().unwrap()], home.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("does not exist"));
}

#[test]
fn test_invalid_config_value_exits_with_error() {
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), "bad.toml", "container = \"stack\"\n");
    let output = run_waitqueue(&["-c", config.to_str().unwrap()], home.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Invalid container"));
}
