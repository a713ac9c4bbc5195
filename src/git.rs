use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use log::{debug, warn};

use crate::args;
use crate::process::{CommandExecutor, SystemExecutor};

const DEFAULT_CONTEXT_LINES: u32 = 3;
const DEFAULT_LOG_LIMIT: usize = 50;
const COMMIT_END_MARKER: &str = "---COMMIT-END---";
const LOG_FORMAT: &str = "--format=%H%n%h%n%s%n%b%n%an%n%ad%n---COMMIT-END---";
const UNKNOWN_USER: &str = "unknown-user";

#[derive(Error, Debug)]
pub enum GitError {
  #[error("Failed to run git: {0}. Is git installed?")]
  Io(#[from] io::Error),

  #[error("'git {command}' exited with code {code}: {stderr}")]
  CommandFailed {
    command: String,
    code:    i32,
    stderr:  String
  }
}

pub type Result<T, E = GitError> = std::result::Result<T, E>;

/// A commit as read from `git log`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitCommit {
  pub hash:       String,
  pub short_hash: String,
  pub subject:    String,
  pub body:       String,
  pub author:     String,
  pub date:       String
}

/// Thin wrapper over the `git` executable.
pub struct GitClient<E = SystemExecutor> {
  executor: E
}

impl GitClient<SystemExecutor> {
  pub fn new() -> Self {
    Self::with_executor(SystemExecutor)
  }
}

impl Default for GitClient<SystemExecutor> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: CommandExecutor> GitClient<E> {
  pub fn with_executor(executor: E) -> Self {
    Self { executor }
  }

  async fn run(&self, args: Vec<String>) -> Result<String> {
    let output = self.executor.run("git", &args).await?;

    if !output.is_success() {
      return Err(GitError::CommandFailed {
        command: args.join(" "),
        code:    output.code,
        stderr:  output.stderr.trim().to_string()
      });
    }

    Ok(output.stdout)
  }

  /// Returns `git diff --staged` with the given number of context lines, trimmed.
  pub async fn staged_diff(&self, context_lines: Option<u32>) -> Result<String> {
    let context_lines = context_lines.unwrap_or(DEFAULT_CONTEXT_LINES);
    debug!("[staged_diff] Using {context_lines} context lines");

    let diff = self.run(args!["diff", "--staged", format!("-U{context_lines}")]).await?;
    Ok(diff.trim().to_string())
  }

  pub async fn commit(&self, message: &str) -> Result<()> {
    debug!("[commit] Committing with message");
    self.run(args!["commit", "-m", message]).await.map(|_| ())
  }

  /// Commits reachable from `to` but not from `from`, newest first.
  pub async fn commit_range(&self, from: &str, to: &str) -> Result<Vec<GitCommit>> {
    let output = self
      .run(args!["log", LOG_FORMAT, "--date=iso", format!("{from}..{to}")])
      .await?;

    let commits = parse_log(&output);
    debug!("[commit_range] Found {} commits in {from}..{to}", commits.len());
    Ok(commits)
  }

  pub async fn recent_commits(&self, limit: Option<usize>) -> Result<Vec<GitCommit>> {
    let limit = limit.unwrap_or(DEFAULT_LOG_LIMIT);
    let output = self
      .run(args!["log", LOG_FORMAT, "--date=iso", format!("-n{limit}")])
      .await?;

    Ok(parse_log(&output))
  }

  /// The configured `user.name`, or `unknown-user` if it cannot be read.
  pub async fn user_name(&self) -> String {
    match self.run(args!["config", "user.name"]).await {
      Ok(name) if !name.trim().is_empty() => name.trim().to_string(),
      Ok(_) => UNKNOWN_USER.to_string(),
      Err(err) => {
        warn!("Failed to get git username: {err}");
        UNKNOWN_USER.to_string()
      }
    }
  }
}

/// Parses `git log` output produced with [`LOG_FORMAT`].
///
/// Each record is `hash`, `short hash`, `subject`, zero or more body lines,
/// `author` and `date`, terminated by the end marker.
pub fn parse_log(output: &str) -> Vec<GitCommit> {
  output
    .split(COMMIT_END_MARKER)
    .filter(|chunk| !chunk.trim().is_empty())
    .map(parse_commit)
    .collect()
}

fn parse_commit(chunk: &str) -> GitCommit {
  let lines: Vec<&str> = chunk.trim().split('\n').collect();
  let line = |index: usize| lines.get(index).copied().unwrap_or_default().to_string();
  let from_end = |offset: usize| {
    lines
      .len()
      .checked_sub(offset)
      .map(|index| line(index))
      .unwrap_or_default()
  };

  let body_end = lines.len().saturating_sub(2);
  let body = lines
    .get(3..body_end)
    .map(|body| body.join("\n"))
    .unwrap_or_default();

  GitCommit {
    hash:       line(0),
    short_hash: line(1),
    subject:    line(2),
    body:       body.trim().to_string(),
    author:     from_end(2),
    date:       from_end(1)
  }
}
