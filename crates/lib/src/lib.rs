//! modbox-lib: Core types and logic for modbox
//!
//! This crate drives the configure/build/test/run lifecycle of the modules
//! declared in a `box.yml` file:
//! - `config`: the declarative module set and its settings
//! - `execute`: turning a `Target` into ordered sandboxed command invocations
//! - `workdir`: the per-module `build` directory
//! - `orchestrator`: phase sequencing across one module or the whole set

pub mod config;
pub mod consts;
pub mod execute;
pub mod orchestrator;
pub mod paths;
pub mod workdir;

#[cfg(test)]
mod util;
