//! CLI integration tests for modbox.
//!
//! Every test runs real shell commands through `--host` inside a temporary
//! project directory.

mod common;
mod modules_tests;
