//! Target resolution.
//!
//! Expands a [`Target`] into an ordered list of [`Invocation`]s and runs them
//! one after another in a [`Sandbox`], stopping at the first failure.
//!
//! Each command string goes through two rewrites before it runs:
//! 1. `${srcdir}` is replaced with `..` (the module source directory as seen
//!    from its build directory). By default only the first occurrence is
//!    replaced; see [`SrcdirPolicy`].
//! 2. The context prefix, if any, is prepended with a single space.

use tracing::{debug, info};

use crate::config::{MissingTargetPolicy, Settings, SrcdirPolicy, Target};
use crate::consts::{SRCDIR_TOKEN, SRCDIR_VALUE};

use super::sandbox::Sandbox;
use super::types::{ExecuteError, ExecutionContext, Invocation};

/// Replace `${srcdir}` in a command according to `policy`.
pub fn substitute_srcdir(command: &str, policy: SrcdirPolicy) -> String {
  match policy {
    SrcdirPolicy::First => command.replacen(SRCDIR_TOKEN, SRCDIR_VALUE, 1),
    SrcdirPolicy::All => command.replace(SRCDIR_TOKEN, SRCDIR_VALUE),
  }
}

/// Turns targets into sandboxed command invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetResolver {
  pub srcdir: SrcdirPolicy,
  pub missing: MissingTargetPolicy,
}

impl TargetResolver {
  pub fn new(srcdir: SrcdirPolicy, missing: MissingTargetPolicy) -> Self {
    Self { srcdir, missing }
  }

  pub fn from_settings(settings: &Settings) -> Self {
    Self::new(settings.srcdir, settings.missing_target)
  }

  /// Apply substitution, then the context prefix, to a single command.
  pub fn prepare_command(&self, command: &str, ctx: &ExecutionContext) -> String {
    let command = substitute_srcdir(command, self.srcdir);
    match &ctx.prefix {
      Some(prefix) => format!("{} {}", prefix, command),
      None => command,
    }
  }

  /// Flatten a target into the invocations it stands for, in run order.
  ///
  /// An absent target yields a single empty, unprefixed command under
  /// [`MissingTargetPolicy::Invoke`] and nothing under
  /// [`MissingTargetPolicy::Skip`].
  pub fn expand(&self, target: Option<&Target>, ctx: &ExecutionContext) -> Vec<Invocation> {
    let mut invocations = Vec::new();
    match target {
      Some(target) => self.expand_into(target, ctx, &mut invocations),
      None => match self.missing {
        MissingTargetPolicy::Invoke => invocations.push(Invocation::new(String::new(), &ctx.workdir)),
        MissingTargetPolicy::Skip => {}
      },
    }
    invocations
  }

  fn expand_into(&self, target: &Target, ctx: &ExecutionContext, out: &mut Vec<Invocation>) {
    match target {
      Target::Command(command) => out.push(Invocation::new(self.prepare_command(command, ctx), &ctx.workdir)),
      Target::Sequence(steps) => {
        for step in steps {
          self.expand_into(step, ctx, out);
        }
      }
    }
  }

  /// Run a target in `sandbox`.
  ///
  /// Invocations run strictly in order; the first failure is returned
  /// unchanged and nothing after it runs. Returns the number of
  /// invocations that completed.
  pub async fn resolve<S: Sandbox>(
    &self,
    sandbox: &S,
    target: Option<&Target>,
    ctx: &ExecutionContext,
  ) -> Result<usize, ExecuteError> {
    let invocations = self.expand(target, ctx);

    if invocations.is_empty() {
      match target {
        Some(_) => debug!(workdir = %ctx.workdir.display(), "target declares no commands"),
        None => debug!(workdir = %ctx.workdir.display(), "no target declared, skipping"),
      }
      return Ok(0);
    }

    for (index, invocation) in invocations.iter().enumerate() {
      info!(
        cmd = %invocation.command,
        workdir = %invocation.workdir.display(),
        step = index + 1,
        of = invocations.len(),
        "running command"
      );
      sandbox.run(&invocation.command, &invocation.workdir).await?;
    }

    Ok(invocations.len())
  }
}
