//! Subprocess execution for the `git` and `gh` wrappers.

use std::io;

use async_trait::async_trait;
use tokio::process::Command;

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
  pub code:   i32,
  pub stdout: String,
  pub stderr: String
}

impl CommandOutput {
  pub fn success(stdout: impl Into<String>) -> Self {
    Self { code: 0, stdout: stdout.into(), stderr: String::new() }
  }

  pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
    Self { code, stdout: String::new(), stderr: stderr.into() }
  }

  pub fn is_success(&self) -> bool {
    self.code == 0
  }
}

/// Runs external programs. Implemented by [`SystemExecutor`] and by scripted
/// executors in tests.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
  async fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// Spawns real processes in the current working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

#[async_trait]
impl CommandExecutor for SystemExecutor {
  async fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
    log::debug!("Running: {} {}", program, args.join(" "));

    let output = Command::new(program).args(args).output().await?;

    Ok(CommandOutput {
      // Killed by a signal
      code:   output.status.code().unwrap_or(-1),
      stdout: output.stdout.to_utf8(),
      stderr: output.stderr.to_utf8()
    })
  }
}

/// Extension trait for converting bytes to UTF-8 strings
pub trait Utf8String {
  fn to_utf8(&self) -> String;
}

impl Utf8String for Vec<u8> {
  fn to_utf8(&self) -> String {
    self.as_slice().to_utf8()
  }
}

impl Utf8String for [u8] {
  fn to_utf8(&self) -> String {
    // Fast path for valid UTF-8 (most common case)
    if let Ok(s) = std::str::from_utf8(self) {
      return s.to_string();
    }
    String::from_utf8_lossy(self).into_owned()
  }
}

/// Builds an owned argument list from string literals and formatted values.
#[macro_export]
macro_rules! args {
  ($($arg:expr),* $(,)?) => {
    vec![$(::std::string::ToString::to_string(&$arg)),*]
  };
}
