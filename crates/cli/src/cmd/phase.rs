//! Implementation of the `configure`, `build`, `test` and `run` commands.

use std::time::Instant;

use anyhow::Result;

use modbox_lib::orchestrator::Phase;

use super::{GlobalArgs, Session, runtime};
use crate::output::{format_duration, print_success};

/// Run `phase` on one module, or on every module in declaration order.
///
/// Earlier phases run as needed: `build` configures unconfigured modules,
/// `test` and `run` build first. Stops at the first failing command.
pub fn cmd_phase(args: &GlobalArgs, phase: Phase, module: Option<&str>) -> Result<()> {
  let start = Instant::now();
  let mut orchestrator = Session::open(args)?.orchestrator();

  runtime()?.block_on(orchestrator.execute(phase, module))?;

  let scope = match module {
    Some(name) => format!("module '{}'", name),
    None => "all modules".to_string(),
  };
  print_success(&format!(
    "{} finished for {} in {}",
    phase,
    scope,
    format_duration(start.elapsed())
  ));

  Ok(())
}
