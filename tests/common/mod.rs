//! Shared helpers for the integration suite.

use assert_cmd::Command;
use std::path::Path;

/// The `cmake-relink` binary, run inside `dir` with a clean environment.
pub fn relink(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cmake-relink").expect("binary builds");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("CMAKE_RELINK_CONFIG")
        .env("NO_COLOR", "1");
    cmd
}
