//! Project and machine path resolution.

use std::io;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::consts::MACHINES_DIR_ENV;

/// Absolute directory containing `config_path`.
///
/// Module directories are resolved against it.
pub fn project_dir(config_path: &Path) -> io::Result<PathBuf> {
  let config_path = dunce::canonicalize(config_path)?;
  Ok(
    config_path
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or(config_path),
  )
}

/// Directory holding machine root filesystems.
///
/// `MODBOX_MACHINES_DIR` takes precedence over `settings.machines_dir`.
pub fn machines_dir(settings: &Settings) -> PathBuf {
  std::env::var_os(MACHINES_DIR_ENV)
    .filter(|dir| !dir.is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| settings.machines_dir.clone())
}

/// Root filesystem of the named machine.
pub fn machine_root(settings: &Settings, machine: &str) -> PathBuf {
  machines_dir(settings).join(machine)
}
