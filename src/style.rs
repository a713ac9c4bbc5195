use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use console::{Emoji, Term};
use indicatif::{ProgressBar, ProgressStyle};

pub const CHECK: Emoji<'_, '_> = Emoji("✔ ", "");

pub trait Styled {
  fn relative_path(&self) -> PathBuf;
}

impl Styled for Path {
  /// Path relative to the current directory, or the path itself if it lies elsewhere.
  fn relative_path(&self) -> PathBuf {
    env::current_dir()
      .ok()
      .and_then(|dir| self.strip_prefix(dir).ok().map(Path::to_path_buf))
      .unwrap_or_else(|| self.to_path_buf())
  }
}

/// Spinner on stderr while a model request is in flight.
pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
  let style = ProgressStyle::default_spinner()
    .tick_strings(&["-", "\\", "|", "/", "-"])
    .template("{spinner:.blue} {msg}")
    .context("Failed to create progress bar style")?;

  let pb = ProgressBar::new_spinner();
  pb.set_style(style);
  pb.set_message(message.into());
  pb.enable_steady_tick(Duration::from_millis(150));
  Ok(pb)
}

/// Asks a yes/no question on the terminal. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> Result<bool> {
  let term = Term::stderr();
  term
    .write_str(&format!("{} {} ", question.bold(), "[y/N]".dimmed()))
    .context("Failed to write prompt")?;

  let answer = term.read_line().context("Failed to read answer")?;
  Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
  matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
