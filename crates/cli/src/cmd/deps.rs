//! Implementation of the `modbox deps` command.

use anyhow::Result;

use super::{GlobalArgs, Session, runtime};
use crate::output::{print_info, print_success};

/// Install the packages listed under `dependencies` into the machine.
pub fn cmd_deps(args: &GlobalArgs) -> Result<()> {
  let orchestrator = Session::open(args)?.orchestrator();

  let count = orchestrator.config().dependencies.len();
  if count == 0 {
    print_info("No dependencies declared");
    return Ok(());
  }

  runtime()?.block_on(orchestrator.install_dependencies())?;

  print_success(&format!("Installed {} package(s)", count));
  Ok(())
}
