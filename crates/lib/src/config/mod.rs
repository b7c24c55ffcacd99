//! Loading of `box.yml` configuration files.

mod types;

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

pub use types::{BoxConfig, MissingTargetPolicy, Module, ModuleSet, Settings, SrcdirPolicy, Target};

use crate::consts::APP_NAME;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config file not found: {0}")]
  NotFound(PathBuf),

  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("module names must not be empty")]
  EmptyModuleName,

  #[error("invalid module name '{0}': must be a single directory name")]
  InvalidModuleName(String),
}

/// Whether `name` names a directory directly inside the project.
fn is_plain_dir_name(name: &str) -> bool {
  let mut components = Path::new(name).components();
  matches!(
    (components.next(), components.next()),
    (Some(Component::Normal(_)), None)
  ) && !name.contains(['/', '\\'])
}

impl BoxConfig {
  /// Read and parse a configuration file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    if !path.is_file() {
      return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let config = Self::parse(&content).map_err(|err| match err {
      ConfigError::Parse { source, .. } => ConfigError::Parse {
        path: path.to_path_buf(),
        source,
      },
      other => other,
    })?;

    debug!(
      path = %path.display(),
      modules = config.modules.len(),
      dependencies = config.dependencies.len(),
      "loaded config"
    );

    Ok(config)
  }

  /// Parse configuration from YAML text.
  pub fn parse(content: &str) -> Result<Self, ConfigError> {
    // An empty document deserializes to unit, not to an empty mapping.
    if content.trim().is_empty() {
      return Ok(Self::default());
    }

    let config: BoxConfig = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
      path: PathBuf::new(),
      source,
    })?;
    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.modules.keys().any(|name| name.trim().is_empty()) {
      return Err(ConfigError::EmptyModuleName);
    }

    if let Some(name) = self.modules.keys().find(|name| !is_plain_dir_name(name)) {
      return Err(ConfigError::InvalidModuleName(name.clone()));
    }

    for (name, module) in &self.modules {
      if module.declared_phases().is_empty() {
        warn!(module = %name, "module declares no targets");
      }
    }

    Ok(())
  }

  /// Name of the machine the modules are built in.
  ///
  /// Uses the configured `name`, then the project directory's name.
  pub fn machine_name(&self, project_dir: &Path) -> String {
    if let Some(name) = &self.name {
      return name.clone();
    }

    project_dir
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_else(|| APP_NAME.to_string())
  }
}
