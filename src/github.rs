use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use log::{debug, warn};

use crate::args;
use crate::process::{CommandExecutor, SystemExecutor};

const DELETE_COMMENT_MUTATION: &str =
  "query=mutation($id: ID!) { deleteIssueComment(input: {id: $id}) { clientMutationId } }";

#[derive(Error, Debug)]
pub enum GitHubError {
  #[error("Failed to run gh: {0}. Is `gh` installed and are you logged in?")]
  Io(#[from] io::Error),

  #[error("Failed to detect repository. Are you inside a Git repository directory?")]
  RepositoryNotFound,

  #[error("'gh {command}' exited with code {code}: {stderr}")]
  CommandFailed {
    command: String,
    code:    i32,
    stderr:  String
  },

  #[error("Failed to decode gh output: {0}")]
  Decode(#[from] serde_json::Error)
}

pub type Result<T, E = GitHubError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrComment {
  pub id:   String,
  pub body: String
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoView {
  name_with_owner: String
}

#[derive(Debug, Deserialize)]
struct CommentsView {
  comments: Vec<PrComment>
}

/// Fields to change on a pull request; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrUpdate {
  pub pr:    String,
  pub repo:  String,
  pub title: Option<String>,
  pub body:  Option<String>
}

/// Thin wrapper over the GitHub CLI.
pub struct GitHubClient<E = SystemExecutor> {
  executor: E
}

impl GitHubClient<SystemExecutor> {
  pub fn new() -> Self {
    Self::with_executor(SystemExecutor)
  }
}

impl Default for GitHubClient<SystemExecutor> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: CommandExecutor> GitHubClient<E> {
  pub fn with_executor(executor: E) -> Self {
    Self { executor }
  }

  async fn run(&self, args: Vec<String>) -> Result<String> {
    let output = self.executor.run("gh", &args).await?;

    if !output.is_success() {
      return Err(GitHubError::CommandFailed {
        command: args.join(" "),
        code:    output.code,
        stderr:  output.stderr.trim().to_string()
      });
    }

    Ok(output.stdout)
  }

  /// `owner/name` of the repository in the current directory.
  pub async fn local_repo(&self) -> Result<String> {
    let output = self
      .run(args!["repo", "view", "--json", "nameWithOwner"])
      .await
      .map_err(|err| {
        debug!("gh repo view failed: {err}");
        GitHubError::RepositoryNotFound
      })?;

    if output.trim().is_empty() {
      return Err(GitHubError::RepositoryNotFound);
    }

    serde_json::from_str::<RepoView>(&output)
      .map(|view| view.name_with_owner)
      .map_err(|_| GitHubError::RepositoryNotFound)
  }

  pub async fn pr_diff(&self, pr: &str, repo: &str) -> Result<String> {
    let diff = self.run(args!["pr", "diff", pr, "-R", repo]).await?;
    Ok(diff.trim().to_string())
  }

  pub async fn update_pr(&self, update: &PrUpdate) -> Result<()> {
    let mut args = args!["pr", "edit", update.pr, "-R", update.repo];

    if let Some(title) = update.title.as_deref().filter(|t| !t.is_empty()) {
      args.extend(args!["--title", title]);
    }
    if let Some(body) = update.body.as_deref().filter(|b| !b.is_empty()) {
      args.extend(args!["--body", body]);
    }

    self.run(args).await.map(|_| ())
  }

  /// Comments on a pull request. Failures are logged and yield an empty list.
  pub async fn list_pr_comments(&self, pr: &str, repo: &str) -> Vec<PrComment> {
    let result = self
      .run(args!["pr", "view", pr, "-R", repo, "--json", "comments"])
      .await
      .and_then(|output| Ok(serde_json::from_str::<CommentsView>(&output)?));

    match result {
      Ok(view) => view.comments,
      Err(err) => {
        warn!("Failed to list comments for PR #{pr}: {err}");
        Vec::new()
      }
    }
  }

  pub async fn add_pr_comment(&self, pr: &str, repo: &str, body: &str) -> Result<()> {
    self
      .run(args!["pr", "comment", pr, "-R", repo, "--body", body])
      .await
      .map(|_| ())
  }

  /// Deletes an issue comment by node id. A failure is only logged since the
  /// comment may already be gone.
  pub async fn delete_pr_comment(&self, comment_id: &str) {
    let result = self
      .run(args!["api", "graphql", "-f", format!("id={comment_id}"), "-f", DELETE_COMMENT_MUTATION])
      .await;

    if let Err(err) = result {
      warn!("Could not delete comment {comment_id}. It might have been already deleted. ({err})");
    }
  }
}
