//! Test utilities for modbox-lib.
//!
//! Provides a sandbox that records what it is asked to do instead of running
//! anything, and a reporter that records progress notifications.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::consts::DEFAULT_MOUNT_POINT;
use crate::execute::{ExecuteError, Sandbox};
use crate::orchestrator::{Phase, Reporter};

/// A request made to a [`RecordingSandbox`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxCall {
  Run { command: String, workdir: PathBuf },
  Install(Vec<String>),
}

/// Sandbox that records calls and fails on request.
#[derive(Debug)]
pub struct RecordingSandbox {
  root: PathBuf,
  calls: Mutex<Vec<SandboxCall>>,
  fail_on: Option<String>,
  fail_install: bool,
}

impl RecordingSandbox {
  /// A sandbox rooted at `/workspace`.
  pub fn new() -> Self {
    Self {
      root: PathBuf::from(DEFAULT_MOUNT_POINT),
      calls: Mutex::new(Vec::new()),
      fail_on: None,
      fail_install: false,
    }
  }

  /// Fail with exit code 1 when asked to run exactly `command`.
  pub fn fail_on(mut self, command: &str) -> Self {
    self.fail_on = Some(command.to_string());
    self
  }

  pub fn fail_install(mut self) -> Self {
    self.fail_install = true;
    self
  }

  pub fn calls(&self) -> Vec<SandboxCall> {
    self.calls.lock().unwrap().clone()
  }

  /// Commands passed to `run`, in order.
  pub fn commands(&self) -> Vec<String> {
    self
      .calls()
      .into_iter()
      .filter_map(|call| match call {
        SandboxCall::Run { command, .. } => Some(command),
        SandboxCall::Install(_) => None,
      })
      .collect()
  }
}

impl Default for RecordingSandbox {
  fn default() -> Self {
    Self::new()
  }
}

impl Sandbox for RecordingSandbox {
  fn root(&self) -> &Path {
    &self.root
  }

  async fn run(&self, command: &str, workdir: &Path) -> Result<(), ExecuteError> {
    self.calls.lock().unwrap().push(SandboxCall::Run {
      command: command.to_string(),
      workdir: workdir.to_path_buf(),
    });

    if self.fail_on.as_deref() == Some(command) {
      return Err(ExecuteError::CmdFailed {
        cmd: command.to_string(),
        code: Some(1),
      });
    }
    Ok(())
  }

  async fn install_packages(&self, names: &[String]) -> Result<(), ExecuteError> {
    self.calls.lock().unwrap().push(SandboxCall::Install(names.to_vec()));

    if self.fail_install {
      return Err(ExecuteError::CmdFailed {
        cmd: names.join(" "),
        code: Some(1),
      });
    }
    Ok(())
  }
}

/// Reporter that records `"start <phase> <module>"` / `"finish <phase> <module>"`.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
  events: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
  pub fn events(&self) -> Vec<String> {
    self.events.lock().unwrap().clone()
  }
}

impl Reporter for RecordingReporter {
  fn installing_dependencies(&self, packages: &[String]) {
    self.events.lock().unwrap().push(format!("install {}", packages.join(" ")));
  }

  fn phase_started(&self, phase: Phase, module: &str) {
    self.events.lock().unwrap().push(format!("start {} {}", phase, module));
  }

  fn phase_finished(&self, phase: Phase, module: &str) {
    self.events.lock().unwrap().push(format!("finish {} {}", phase, module));
  }
}
