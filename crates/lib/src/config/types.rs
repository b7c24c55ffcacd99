//! Configuration types for modbox.
//!
//! A `box.yml` file declares the packages a machine needs and an ordered set
//! of modules, each with up to four lifecycle targets.
//!
//! # Example
//!
//! ```yaml
//! name: devbox
//! dependencies: [cmake, gcc]
//! modules:
//!   app:
//!     configure: cmake ${srcdir}
//!     build: make
//!     test: [["./unit", "./integration"], "./smoke"]
//! ```

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::consts::{
  DEFAULT_MACHINES_DIR, DEFAULT_MOUNT_POINT, DEFAULT_PACKAGE_MANAGER, DEFAULT_SHELL, DEFAULT_TEST_PREFIX,
};
use crate::orchestrator::Phase;

/// One or more shell commands, possibly nested for grouping.
///
/// A YAML string is a single command; a YAML sequence is run element by
/// element, in order, and may itself contain sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
  Command(String),
  Sequence(Vec<Target>),
}

impl Target {
  /// Number of commands in this target, counting through nested sequences.
  pub fn command_count(&self) -> usize {
    match self {
      Target::Command(_) => 1,
      Target::Sequence(steps) => steps.iter().map(Target::command_count).sum(),
    }
  }
}

impl From<&str> for Target {
  fn from(command: &str) -> Self {
    Target::Command(command.to_string())
  }
}

impl<T: Into<Target>> From<Vec<T>> for Target {
  fn from(steps: Vec<T>) -> Self {
    Target::Sequence(steps.into_iter().map(Into::into).collect())
  }
}

/// A named unit with its lifecycle targets. Any phase may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Module {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub configure: Option<Target>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub build: Option<Target>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub test: Option<Target>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub run: Option<Target>,
}

impl Module {
  pub fn target(&self, phase: Phase) -> Option<&Target> {
    match phase {
      Phase::Configure => self.configure.as_ref(),
      Phase::Build => self.build.as_ref(),
      Phase::Test => self.test.as_ref(),
      Phase::Run => self.run.as_ref(),
    }
  }

  /// Phases that have a target declared, in lifecycle order.
  pub fn declared_phases(&self) -> Vec<Phase> {
    Phase::ALL.into_iter().filter(|phase| self.target(*phase).is_some()).collect()
  }
}

/// Modules keyed by name, in declaration order.
pub type ModuleSet = IndexMap<String, Module>;

/// How many `${srcdir}` tokens in a command get substituted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SrcdirPolicy {
  /// Only the first occurrence; later ones stay literal.
  #[default]
  First,
  /// Every occurrence.
  All,
}

/// What to do when a module declares no target for a phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTargetPolicy {
  /// Invoke the sandbox once with an empty command.
  #[default]
  Invoke,
  /// Issue no invocation at all.
  Skip,
}

/// Tool settings. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
  /// Directory holding machine root filesystems.
  pub machines_dir: PathBuf,
  /// Where the project directory is bound inside the machine.
  pub mount_point: PathBuf,
  /// Command prefix used to install `dependencies`.
  pub package_manager: String,
  /// Shell that interprets every command.
  pub shell: String,
  /// Prefix applied to test commands.
  pub test_prefix: String,
  pub srcdir: SrcdirPolicy,
  pub missing_target: MissingTargetPolicy,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      machines_dir: PathBuf::from(DEFAULT_MACHINES_DIR),
      mount_point: PathBuf::from(DEFAULT_MOUNT_POINT),
      package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
      shell: DEFAULT_SHELL.to_string(),
      test_prefix: DEFAULT_TEST_PREFIX.to_string(),
      srcdir: SrcdirPolicy::default(),
      missing_target: MissingTargetPolicy::default(),
    }
  }
}

/// The parsed contents of a `box.yml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxConfig {
  /// Machine name. Falls back to the project directory name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Packages installed into the machine by `modbox deps`.
  #[serde(default)]
  pub dependencies: Vec<String>,
  #[serde(default)]
  pub settings: Settings,
  #[serde(default)]
  pub modules: ModuleSet,
}
