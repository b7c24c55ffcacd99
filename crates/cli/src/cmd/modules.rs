//! Implementation of the `modbox modules` command.
//!
//! Lists modules in declaration order with their declared phases, the number
//! of commands they declare and whether they have been configured.

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use modbox_lib::config::Target;
use modbox_lib::orchestrator::{BuildState, Phase};

use super::{GlobalArgs, Session, runtime};
use crate::output::{OutputFormat, print_info, print_json, symbols};

#[derive(Debug, Serialize)]
struct ModuleEntry {
  name: String,
  phases: Vec<Phase>,
  commands: usize,
  state: BuildState,
}

pub fn cmd_modules(args: &GlobalArgs, output: OutputFormat) -> Result<()> {
  let mut orchestrator = Session::open(args)?.orchestrator();
  let rt = runtime()?;

  let modules: Vec<(String, Vec<Phase>, usize)> = orchestrator
    .config()
    .modules
    .iter()
    .map(|(name, module)| {
      let phases = module.declared_phases();
      let commands = phases
        .iter()
        .filter_map(|phase| module.target(*phase))
        .map(Target::command_count)
        .sum();
      (name.clone(), phases, commands)
    })
    .collect();

  let mut entries = Vec::with_capacity(modules.len());
  for (name, phases, commands) in modules {
    let state = rt.block_on(orchestrator.state(&name))?;
    entries.push(ModuleEntry {
      name,
      phases,
      commands,
      state,
    });
  }

  if output.is_json() {
    return print_json(&entries);
  }

  if entries.is_empty() {
    print_info("No modules declared");
    return Ok(());
  }

  for entry in &entries {
    let phases: Vec<&str> = entry.phases.iter().map(Phase::as_str).collect();
    println!(
      "  {} {} {} {}",
      symbols::INFO.if_supports_color(Stream::Stdout, |s| s.cyan()),
      entry.name.if_supports_color(Stream::Stdout, |s| s.bold()),
      phases.join(", "),
      format!("({}, {} command(s))", entry.state, entry.commands).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }

  Ok(())
}
