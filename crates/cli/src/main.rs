mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use modbox_lib::orchestrator::Phase;

use cmd::{GlobalArgs, cmd_deps, cmd_modules, cmd_phase};
use output::{OutputFormat, print_error};

/// modbox - build, test and run project modules inside an isolated machine
#[derive(Parser)]
#[command(name = "modbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(flatten)]
  global: GlobalArgs,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Install the configured dependency packages into the machine
  Deps,

  /// Configure modules, creating their build directories
  Configure {
    /// Module to configure (default: all, in declaration order)
    module: Option<String>,
  },

  /// Build modules, configuring them first if needed
  Build {
    /// Module to build (default: all, in declaration order)
    module: Option<String>,
  },

  /// Build and test modules under a virtual display
  Test {
    /// Module to test (default: all, in declaration order)
    module: Option<String>,
  },

  /// Build and run modules
  Run {
    /// Module to run (default: all, in declaration order)
    module: Option<String>,
  },

  /// List modules in declaration order
  Modules {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.global.verbose);

  if let Err(err) = run(cli) {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "modbox=debug,modbox_lib=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  let global = &cli.global;

  match cli.command {
    Commands::Deps => cmd_deps(global),
    Commands::Configure { module } => cmd_phase(global, Phase::Configure, module.as_deref()),
    Commands::Build { module } => cmd_phase(global, Phase::Build, module.as_deref()),
    Commands::Test { module } => cmd_phase(global, Phase::Test, module.as_deref()),
    Commands::Run { module } => cmd_phase(global, Phase::Run, module.as_deref()),
    Commands::Modules { output } => cmd_modules(global, output),
  }
}
