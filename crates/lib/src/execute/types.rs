//! Types for target execution.
//!
//! This module defines the execution context a target runs in, the concrete
//! invocations a target expands to, and the errors a sandbox can report.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while running a command in a sandbox.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// Command ran and exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  CmdFailed { cmd: String, code: Option<i32> },

  /// Command could not be started.
  #[error("failed to launch command `{cmd}`: {source}")]
  Spawn {
    cmd: String,
    #[source]
    source: io::Error,
  },
}

/// Where and how the commands of a target run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
  /// Working directory, as seen by the sandbox.
  pub workdir: PathBuf,
  /// Prepended to every command, separated by a single space.
  pub prefix: Option<String>,
}

impl ExecutionContext {
  pub fn new(workdir: impl Into<PathBuf>) -> Self {
    Self {
      workdir: workdir.into(),
      prefix: None,
    }
  }

  pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.prefix = Some(prefix.into());
    self
  }
}

/// A single command ready to be handed to a sandbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub command: String,
  pub workdir: PathBuf,
}

impl Invocation {
  pub fn new(command: impl Into<String>, workdir: &Path) -> Self {
    Self {
      command: command.into(),
      workdir: workdir.to_path_buf(),
    }
  }
}
