mod deps;
mod modules;
mod phase;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use modbox_lib::config::BoxConfig;
use modbox_lib::consts::CONFIG_FILE;
use modbox_lib::execute::{Backend, HostSandbox, NspawnSandbox};
use modbox_lib::orchestrator::ModuleOrchestrator;
use modbox_lib::paths;
use modbox_lib::workdir::WorkdirManager;

use crate::output::BannerReporter;

pub use deps::cmd_deps;
pub use modules::cmd_modules;
pub use phase::cmd_phase;

/// Options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
  /// Path to the configuration file
  #[arg(short, long, global = true, default_value = CONFIG_FILE)]
  pub config: PathBuf,

  /// Machine to run in (default: `name` from the config, then the project directory name)
  #[arg(short, long, global = true)]
  pub machine: Option<String>,

  /// Run commands directly on the host instead of inside the machine
  #[arg(long, global = true)]
  pub host: bool,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  pub verbose: bool,
}

/// A loaded configuration and the sandbox it runs in.
pub struct Session {
  pub config: BoxConfig,
  pub project_dir: PathBuf,
  pub backend: Backend,
}

impl Session {
  pub fn open(args: &GlobalArgs) -> Result<Self> {
    let config = BoxConfig::load(&args.config).context("Failed to load configuration")?;
    let project_dir = paths::project_dir(&args.config).context("Failed to resolve project directory")?;

    let backend = if args.host {
      Backend::Host(HostSandbox::from_settings(&config.settings, &project_dir))
    } else {
      let machine = args
        .machine
        .clone()
        .unwrap_or_else(|| config.machine_name(&project_dir));
      Backend::Nspawn(NspawnSandbox::from_settings(&config.settings, &machine, &project_dir))
    };

    debug!(project = %project_dir.display(), backend = ?backend, "opened session");

    Ok(Self {
      config,
      project_dir,
      backend,
    })
  }

  pub fn orchestrator(self) -> ModuleOrchestrator<Backend, BannerReporter> {
    let workdirs = WorkdirManager::new(&self.project_dir);
    ModuleOrchestrator::new(self.config, self.backend, workdirs).with_reporter(BannerReporter)
  }
}

pub fn runtime() -> Result<tokio::runtime::Runtime> {
  tokio::runtime::Runtime::new().context("Failed to create async runtime")
}
