//! Types for module orchestration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::execute::ExecuteError;
use crate::workdir::WorkdirError;

/// A lifecycle stage applied to a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
  Configure,
  Build,
  Test,
  Run,
}

impl Phase {
  /// All phases in lifecycle order.
  pub const ALL: [Phase; 4] = [Phase::Configure, Phase::Build, Phase::Test, Phase::Run];

  pub fn as_str(&self) -> &'static str {
    match self {
      Phase::Configure => "configure",
      Phase::Build => "build",
      Phase::Test => "test",
      Phase::Run => "run",
    }
  }

  /// Progressive form used in status lines, e.g. "Building".
  pub fn progressive(&self) -> &'static str {
    match self {
      Phase::Configure => "Configuring",
      Phase::Build => "Building",
      Phase::Test => "Testing",
      Phase::Run => "Running",
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown phase: {0}")]
pub struct ParsePhaseError(String);

impl FromStr for Phase {
  type Err = ParsePhaseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Phase::ALL
      .into_iter()
      .find(|phase| phase.as_str() == s)
      .ok_or_else(|| ParsePhaseError(s.to_string()))
  }
}

/// How far a module has progressed during this orchestrator's lifetime.
///
/// Seeded from build directory existence the first time a module is
/// touched, then advanced only by successful phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildState {
  Unconfigured,
  Configured,
  Built,
}

impl fmt::Display for BuildState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      BuildState::Unconfigured => "unconfigured",
      BuildState::Configured => "configured",
      BuildState::Built => "built",
    };
    f.write_str(s)
  }
}

/// Errors that abort a phase.
#[derive(Debug, Error)]
pub enum OrchestratorError {
  #[error("module not found: {0}")]
  ModuleNotFound(String),

  /// A command of the module's target failed.
  #[error("{phase} failed for module '{module}'")]
  Execute {
    module: String,
    phase: Phase,
    #[source]
    source: ExecuteError,
  },

  #[error("failed to install dependencies")]
  Install(#[source] ExecuteError),

  #[error(transparent)]
  Workdir(#[from] WorkdirError),
}
