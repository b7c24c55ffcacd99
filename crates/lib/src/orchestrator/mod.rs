//! Module lifecycle orchestration.
//!
//! The orchestrator drives the configure → build → test/run lifecycle for one
//! module or for every module in declaration order. Phases imply their
//! predecessors:
//! - `build` configures first when the module is still unconfigured
//! - `test` and `run` always build first
//! - `configure` always runs, whatever the module's state
//!
//! Execution is strictly sequential and fail-fast: the first failing command
//! aborts the current module and every module after it. Nothing is rolled
//! back: once the build directory exists the module counts as configured,
//! even if its configure target then fails, both for later calls on the same
//! orchestrator and on the next run.

mod report;
mod types;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::BoxConfig;
use crate::execute::{ExecutionContext, Sandbox, TargetResolver};
use crate::workdir::WorkdirManager;

pub use report::{NoopReporter, Reporter};
pub use types::{BuildState, OrchestratorError, ParsePhaseError, Phase};

/// Drives module phases against a sandbox.
pub struct ModuleOrchestrator<S, R = NoopReporter> {
  config: BoxConfig,
  sandbox: S,
  workdirs: WorkdirManager,
  resolver: TargetResolver,
  reporter: R,
  states: HashMap<String, BuildState>,
}

impl<S: Sandbox> ModuleOrchestrator<S> {
  pub fn new(config: BoxConfig, sandbox: S, workdirs: WorkdirManager) -> Self {
    let resolver = TargetResolver::from_settings(&config.settings);
    Self {
      config,
      sandbox,
      workdirs,
      resolver,
      reporter: NoopReporter,
      states: HashMap::new(),
    }
  }
}

impl<S: Sandbox, R: Reporter> ModuleOrchestrator<S, R> {
  pub fn with_reporter<T: Reporter>(self, reporter: T) -> ModuleOrchestrator<S, T> {
    ModuleOrchestrator {
      config: self.config,
      sandbox: self.sandbox,
      workdirs: self.workdirs,
      resolver: self.resolver,
      reporter,
      states: self.states,
    }
  }

  pub fn config(&self) -> &BoxConfig {
    &self.config
  }

  pub fn sandbox(&self) -> &S {
    &self.sandbox
  }

  /// Install the configured dependency packages into the sandbox.
  pub async fn install_dependencies(&self) -> Result<(), OrchestratorError> {
    self.reporter.installing_dependencies(&self.config.dependencies);
    self
      .sandbox
      .install_packages(&self.config.dependencies)
      .await
      .map_err(OrchestratorError::Install)
  }

  /// Run `phase` on `module`, or on every module when `None`.
  pub async fn execute(&mut self, phase: Phase, module: Option<&str>) -> Result<(), OrchestratorError> {
    match phase {
      Phase::Configure => self.configure(module).await,
      Phase::Build => self.build(module).await,
      Phase::Test => self.test(module).await,
      Phase::Run => self.run(module).await,
    }
  }

  pub async fn configure(&mut self, module: Option<&str>) -> Result<(), OrchestratorError> {
    for name in self.select(module)? {
      self.configure_steps(&name).await?;
    }
    Ok(())
  }

  pub async fn build(&mut self, module: Option<&str>) -> Result<(), OrchestratorError> {
    for name in self.select(module)? {
      self.build_module(&name).await?;
    }
    Ok(())
  }

  pub async fn test(&mut self, module: Option<&str>) -> Result<(), OrchestratorError> {
    for name in self.select(module)? {
      self.test_module(&name).await?;
    }
    Ok(())
  }

  pub async fn run(&mut self, module: Option<&str>) -> Result<(), OrchestratorError> {
    for name in self.select(module)? {
      self.run_module(&name).await?;
    }
    Ok(())
  }

  /// Current state of a module, seeding it from the filesystem on first use.
  pub async fn state(&mut self, module: &str) -> Result<BuildState, OrchestratorError> {
    if !self.config.modules.contains_key(module) {
      return Err(OrchestratorError::ModuleNotFound(module.to_string()));
    }
    Ok(self.current_state(module).await)
  }

  /// Module names to operate on, in declaration order.
  fn select(&self, module: Option<&str>) -> Result<Vec<String>, OrchestratorError> {
    match module {
      Some(name) if self.config.modules.contains_key(name) => Ok(vec![name.to_string()]),
      Some(name) => Err(OrchestratorError::ModuleNotFound(name.to_string())),
      None => Ok(self.config.modules.keys().cloned().collect()),
    }
  }

  async fn current_state(&mut self, name: &str) -> BuildState {
    if let Some(state) = self.states.get(name) {
      return *state;
    }

    let state = if self.workdirs.exists(name).await {
      BuildState::Configured
    } else {
      BuildState::Unconfigured
    };
    debug!(module = %name, state = %state, "seeded build state");
    self.states.insert(name.to_string(), state);
    state
  }

  fn context(&self, name: &str) -> ExecutionContext {
    ExecutionContext::new(self.sandbox.root().join(WorkdirManager::relative(name)))
  }

  /// Create the build directory and run the configure target.
  async fn configure_steps(&mut self, name: &str) -> Result<(), OrchestratorError> {
    self.reporter.phase_started(Phase::Configure, name);

    let workdir = self.workdirs.ensure(name).await?;
    if workdir.created {
      info!(module = %name, path = %workdir.path.display(), "created build directory");
    }
    self.states.insert(name.to_string(), BuildState::Configured);

    self.run_target(name, Phase::Configure, self.context(name)).await
  }

  async fn build_module(&mut self, name: &str) -> Result<(), OrchestratorError> {
    if self.current_state(name).await == BuildState::Unconfigured {
      self.configure_steps(name).await?;
    } else {
      debug!(module = %name, "already configured, skipping configure");
    }

    self.reporter.phase_started(Phase::Build, name);
    self.run_target(name, Phase::Build, self.context(name)).await?;
    self.states.insert(name.to_string(), BuildState::Built);
    Ok(())
  }

  async fn test_module(&mut self, name: &str) -> Result<(), OrchestratorError> {
    self.build_module(name).await?;

    self.reporter.phase_started(Phase::Test, name);
    let mut ctx = self.context(name);
    let prefix = self.config.settings.test_prefix.trim();
    if !prefix.is_empty() {
      ctx = ctx.with_prefix(prefix);
    }
    self.run_target(name, Phase::Test, ctx).await
  }

  async fn run_module(&mut self, name: &str) -> Result<(), OrchestratorError> {
    self.build_module(name).await?;

    self.reporter.phase_started(Phase::Run, name);
    self.run_target(name, Phase::Run, self.context(name)).await
  }

  async fn run_target(&self, name: &str, phase: Phase, ctx: ExecutionContext) -> Result<(), OrchestratorError> {
    let module = self
      .config
      .modules
      .get(name)
      .ok_or_else(|| OrchestratorError::ModuleNotFound(name.to_string()))?;

    let ran = self
      .resolver
      .resolve(&self.sandbox, module.target(phase), &ctx)
      .await
      .map_err(|source| OrchestratorError::Execute {
        module: name.to_string(),
        phase,
        source,
      })?;

    debug!(module = %name, phase = %phase, commands = ran, "phase complete");
    self.reporter.phase_finished(phase, name);
    Ok(())
  }
}
