//! Shared integration-test harness for running the `prepdeck` binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Runs the `prepdeck` binary with the given arguments and waits for it.
#[allow(clippy::missing_panics_doc)]
pub fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_prepdeck"))
        .args(args)
        .env_remove("PREPDECK_CONTENT")
        .env_remove("PREPDECK_OUTPUT")
        .env_remove("PREPDECK_LOG_LEVEL")
        .env_remove("PREPDECK_LOG_FORMAT")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run prepdeck")
}

/// Path to a file or directory under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Fixture path as a `&str`-friendly `String`.
pub fn fixture(name: &str) -> String {
    fixture_path(name).display().to_string()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
