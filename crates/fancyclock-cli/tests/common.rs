//! Common test utilities shared across integration tests.
//!
//! Note: Clippy cannot track usage across integration test files,
//! hence the `allow(dead_code)` annotation.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fixed instant used by deterministic tests: Monday 24 April 2017, 14:05:09 (+10:00).
pub const MONDAY_AFTERNOON: &str = "2017-04-24T14:05:09+10:00";

pub struct TestFixture {
    temp_dir: TempDir,
    config_path: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("fancyclock").join("config.toml");

        Self {
            temp_dir,
            config_path,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_config(&self, content: &str) {
        std::fs::create_dir_all(self.config_path.parent().unwrap()).unwrap();
        std::fs::write(&self.config_path, content).unwrap();
    }

    /// `fancyclock` with an isolated config file, a fixed locale and no
    /// environment overrides.
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("fancyclock").unwrap();
        cmd.env_remove("FANCYCLOCK_CONFIG")
            .env_remove("FANCYCLOCK_LOG")
            .env("LANG", "en_US.UTF-8")
            .env_remove("LC_ALL")
            .env_remove("LC_TIME")
            .arg("--config")
            .arg(&self.config_path);
        cmd
    }
}
