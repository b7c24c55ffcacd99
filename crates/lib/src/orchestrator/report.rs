//! Progress reporting hooks.

use super::types::Phase;

/// Receives progress notifications from the orchestrator.
///
/// All methods default to doing nothing.
pub trait Reporter {
  fn installing_dependencies(&self, _packages: &[String]) {}

  fn phase_started(&self, _phase: Phase, _module: &str) {}

  fn phase_finished(&self, _phase: Phase, _module: &str) {}
}

/// Reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {}
