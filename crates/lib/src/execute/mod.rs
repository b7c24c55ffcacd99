//! Target execution module.
//!
//! This module turns lifecycle targets into commands and runs them:
//! - [`TargetResolver`] flattens nested targets, substitutes `${srcdir}` and
//!   applies command prefixes
//! - [`Sandbox`] is the execution primitive, with nspawn and host backends

pub mod resolver;
pub mod sandbox;
pub mod types;

pub use resolver::{TargetResolver, substitute_srcdir};
pub use sandbox::{Backend, HostSandbox, NspawnSandbox, Sandbox};
pub use types::{ExecuteError, ExecutionContext, Invocation};
