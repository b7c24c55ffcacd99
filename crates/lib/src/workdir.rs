//! Per-module build directories.
//!
//! Every module builds in `<module>/build`, relative to the project
//! directory. Whether that directory exists is the only record of a module
//! having been configured; its contents are never inspected.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::BUILD_DIR;

/// Errors that can occur while preparing a build directory.
#[derive(Debug, Error)]
pub enum WorkdirError {
  #[error("failed to create build directory {path}: {source}")]
  Create {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// A module's build directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workdir {
  /// Host path of the directory.
  pub path: PathBuf,
  /// Whether this call created it.
  pub created: bool,
}

/// Creates and checks build directories under a project directory.
#[derive(Debug, Clone)]
pub struct WorkdirManager {
  project_dir: PathBuf,
}

impl WorkdirManager {
  pub fn new(project_dir: impl Into<PathBuf>) -> Self {
    Self {
      project_dir: project_dir.into(),
    }
  }

  /// `<module>/build`, relative to the project directory.
  pub fn relative(module: &str) -> PathBuf {
    Path::new(module).join(BUILD_DIR)
  }

  /// Host path of a module's build directory.
  pub fn path(&self, module: &str) -> PathBuf {
    self.project_dir.join(Self::relative(module))
  }

  pub async fn exists(&self, module: &str) -> bool {
    tokio::fs::try_exists(self.path(module)).await.unwrap_or(false)
  }

  /// Make sure a module's build directory exists.
  ///
  /// Only the `build` directory itself is created; the module directory must
  /// already exist.
  pub async fn ensure(&self, module: &str) -> Result<Workdir, WorkdirError> {
    let path = self.path(module);

    if self.exists(module).await {
      return Ok(Workdir { path, created: false });
    }

    let created = match tokio::fs::create_dir(&path).await {
      Ok(()) => true,
      // Lost a race with something else creating it.
      Err(e) if e.kind() == io::ErrorKind::AlreadyExists => false,
      Err(source) => return Err(WorkdirError::Create { path, source }),
    };

    debug!(path = %path.display(), created, "prepared build directory");

    Ok(Workdir { path, created })
  }
}
