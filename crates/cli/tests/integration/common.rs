//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated project directory.
///
/// Each test gets its own temporary directory containing a `box.yml` and a
/// source directory per module.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
}

impl TestEnv {
  /// Create a project from config content, with directories for `modules`.
  pub fn new(config: &str, modules: &[&str]) -> Self {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("box.yml");
    std::fs::write(&config_path, config).unwrap();
    for module in modules {
      std::fs::create_dir(temp.path().join(module)).unwrap();
    }
    Self { temp, config_path }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  /// Read a file relative to the project directory.
  pub fn read(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.path().join(relative_path))
      .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
  }

  /// Lines of a file relative to the project directory.
  pub fn lines(&self, relative_path: &str) -> Vec<String> {
    self.read(relative_path).lines().map(str::to_string).collect()
  }

  pub fn exists(&self, relative_path: &str) -> bool {
    self.path().join(relative_path).exists()
  }

  /// Get a pre-configured Command for the modbox binary.
  ///
  /// Runs in the project directory, on the host, with an isolated machines
  /// directory.
  pub fn modbox_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("modbox");
    cmd.current_dir(self.path());
    cmd.env("MODBOX_MACHINES_DIR", self.path().join("machines"));
    cmd.env_remove("RUST_LOG");
    cmd.arg("--host");
    cmd
  }
}
