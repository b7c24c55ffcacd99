//! Sandboxed command execution.
//!
//! A [`Sandbox`] runs shell commands inside an isolated root filesystem and
//! installs packages into it. Two backends are provided:
//! - [`NspawnSandbox`]: a systemd-nspawn machine with the project directory
//!   bound into it
//! - [`HostSandbox`]: the host itself, for machines that are already isolated
//!   and for tests
//!
//! Command output is not captured; it streams to the terminal.

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use crate::config::Settings;
use crate::paths;

use super::types::ExecuteError;

/// Execution primitive for module commands.
pub trait Sandbox {
  /// Path at which the project directory is visible to commands.
  fn root(&self) -> &Path;

  /// Run `command` through the sandbox shell with `workdir` as its working
  /// directory.
  fn run(&self, command: &str, workdir: &Path) -> impl Future<Output = Result<(), ExecuteError>> + Send;

  /// Install packages into the sandbox. An empty list is a no-op.
  fn install_packages(&self, names: &[String]) -> impl Future<Output = Result<(), ExecuteError>> + Send;
}

/// Build the package installation command, or `None` if there is nothing to install.
fn package_command(package_manager: &str, names: &[String]) -> Option<String> {
  if names.is_empty() {
    return None;
  }
  Some(format!("{} {}", package_manager, names.join(" ")))
}

/// Spawn `program` with `args`, wait for it and map its exit status.
///
/// `cmd` is the user-facing command line reported in errors.
async fn spawn(program: &str, args: &[String], cwd: Option<&Path>, cmd: &str) -> Result<(), ExecuteError> {
  let mut command = Command::new(program);
  command.args(args);
  if let Some(cwd) = cwd {
    command.current_dir(cwd);
  }

  debug!(program = %program, args = ?args, cwd = ?cwd, "spawning process");

  let status = command.status().await.map_err(|source| ExecuteError::Spawn {
    cmd: cmd.to_string(),
    source,
  })?;

  if !status.success() {
    return Err(ExecuteError::CmdFailed {
      cmd: cmd.to_string(),
      code: status.code(),
    });
  }

  Ok(())
}

/// Runs commands in a systemd-nspawn machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NspawnSandbox {
  /// Root filesystem of the machine, e.g. `/var/lib/machines/devbox`.
  pub machine_root: PathBuf,
  /// Host directory bound into the machine.
  pub project_dir: PathBuf,
  /// Where `project_dir` appears inside the machine.
  pub mount_point: PathBuf,
  pub shell: String,
  pub package_manager: String,
}

impl NspawnSandbox {
  pub fn from_settings(settings: &Settings, machine: &str, project_dir: impl Into<PathBuf>) -> Self {
    Self {
      machine_root: paths::machine_root(settings, machine),
      project_dir: project_dir.into(),
      mount_point: settings.mount_point.clone(),
      shell: settings.shell.clone(),
      package_manager: settings.package_manager.clone(),
    }
  }

  /// Arguments passed to `systemd-nspawn` to run `command` in `workdir`.
  pub fn command_args(&self, command: &str, workdir: &Path) -> Vec<String> {
    vec![
      "--quiet".to_string(),
      format!("--directory={}", self.machine_root.display()),
      format!("--bind={}:{}", self.project_dir.display(), self.mount_point.display()),
      format!("--chdir={}", workdir.display()),
      self.shell.clone(),
      "-c".to_string(),
      command.to_string(),
    ]
  }
}

impl Sandbox for NspawnSandbox {
  fn root(&self) -> &Path {
    &self.mount_point
  }

  async fn run(&self, command: &str, workdir: &Path) -> Result<(), ExecuteError> {
    let args = self.command_args(command, workdir);
    spawn("systemd-nspawn", &args, None, command).await
  }

  async fn install_packages(&self, names: &[String]) -> Result<(), ExecuteError> {
    let Some(command) = package_command(&self.package_manager, names) else {
      debug!("no packages to install");
      return Ok(());
    };

    info!(machine = %self.machine_root.display(), packages = names.len(), "installing packages");
    self.run(&command, Path::new("/")).await
  }
}

/// Runs commands directly on the host.
///
/// Relative working directories are resolved against `project_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSandbox {
  pub project_dir: PathBuf,
  pub shell: String,
  pub package_manager: String,
}

impl HostSandbox {
  pub fn from_settings(settings: &Settings, project_dir: impl Into<PathBuf>) -> Self {
    Self {
      project_dir: project_dir.into(),
      shell: settings.shell.clone(),
      package_manager: settings.package_manager.clone(),
    }
  }
}

impl Sandbox for HostSandbox {
  fn root(&self) -> &Path {
    &self.project_dir
  }

  async fn run(&self, command: &str, workdir: &Path) -> Result<(), ExecuteError> {
    let cwd = self.project_dir.join(workdir);
    let args = vec!["-c".to_string(), command.to_string()];
    spawn(&self.shell, &args, Some(&cwd), command).await
  }

  async fn install_packages(&self, names: &[String]) -> Result<(), ExecuteError> {
    let Some(command) = package_command(&self.package_manager, names) else {
      debug!("no packages to install");
      return Ok(());
    };

    info!(packages = names.len(), "installing packages on host");
    self.run(&command, Path::new(".")).await
  }
}

/// Either sandbox backend, chosen at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
  Nspawn(NspawnSandbox),
  Host(HostSandbox),
}

impl Sandbox for Backend {
  fn root(&self) -> &Path {
    match self {
      Backend::Nspawn(sandbox) => sandbox.root(),
      Backend::Host(sandbox) => sandbox.root(),
    }
  }

  async fn run(&self, command: &str, workdir: &Path) -> Result<(), ExecuteError> {
    match self {
      Backend::Nspawn(sandbox) => sandbox.run(command, workdir).await,
      Backend::Host(sandbox) => sandbox.run(command, workdir).await,
    }
  }

  async fn install_packages(&self, names: &[String]) -> Result<(), ExecuteError> {
    match self {
      Backend::Nspawn(sandbox) => sandbox.install_packages(names).await,
      Backend::Host(sandbox) => sandbox.install_packages(names).await,
    }
  }
}
