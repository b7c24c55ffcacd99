//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! banners, human-readable durations, and Unicode symbols.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream, Style};

use modbox_lib::orchestrator::{Phase, Reporter};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

#[derive(Debug, Clone, Copy)]
pub enum BannerColor {
  Blue,
  Magenta,
}

/// Print a bold, padded status line on a colored background.
pub fn print_banner(text: &str, color: BannerColor) {
  let style = match color {
    BannerColor::Blue => Style::new().bold().white().on_blue(),
    BannerColor::Magenta => Style::new().bold().white().on_magenta(),
  };
  let text = format!(" {} ", text);
  println!("{}", text.if_supports_color(Stream::Stdout, |t| t.style(style)));
}

/// Renders orchestrator progress as status banners.
#[derive(Debug, Clone, Copy, Default)]
pub struct BannerReporter;

impl Reporter for BannerReporter {
  fn installing_dependencies(&self, _packages: &[String]) {
    print_banner("Installing dependencies", BannerColor::Magenta);
  }

  fn phase_started(&self, phase: Phase, module: &str) {
    print_banner(&format!("{} {}", phase.progressive(), module), BannerColor::Blue);
  }
}
