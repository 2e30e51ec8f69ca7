// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Run the seedvec binary against a seed file created inside a fresh
/// temporary directory. The API key environment variable is stripped
/// unless the test sets one, so injection tests are hermetic.
pub fn run_seedvec_on_file(
    args: &[&str],
    file_content: &str,
    env: &[(&str, &str)],
) -> (String, String, i32, TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = dir.path().join("seed.sql");
    fs::write(&file_path, file_content).expect("Failed to write seed file");

    let mut full_args: Vec<String> = vec![file_path.to_string_lossy().to_string()];
    full_args.extend(args.iter().map(|s| s.to_string()));

    let mut cmd = Command::new(binary_path());
    cmd.args(&full_args)
        .env_remove("GEMINI_API_KEY")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in env {
        cmd.env(key, value);
    }

    let output = cmd.output().expect("Failed to execute seedvec");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
        dir,
        file_path,
    )
}

/// Run the seedvec binary with raw arguments and no file setup.
pub fn run_seedvec(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(binary_path())
        .args(args)
        .env_remove("GEMINI_API_KEY")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute seedvec");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path).expect("Failed to read file")
}

// Use the built binary directly instead of cargo run to avoid compilation output
fn binary_path() -> &'static str {
    if cfg!(debug_assertions) {
        "./target/debug/seedvec"
    } else {
        "./target/release/seedvec"
    }
}
