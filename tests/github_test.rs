mod common;

use common::{ScriptedExecutor, DIFF};
use gitgen::github::{GitHubClient, GitHubError, PrComment, PrUpdate};
use gitgen::process::CommandOutput;

#[tokio::test]
async fn test_local_repo() {
  let executor = ScriptedExecutor::new().on("gh", &["repo", "view"], CommandOutput::success(r#"{"nameWithOwner":"octo/hello"}"#));
  let github = GitHubClient::with_executor(executor.clone());

  assert_eq!(github.local_repo().await.unwrap(), "octo/hello");
  assert_eq!(executor.calls()[0].args, vec!["repo", "view", "--json", "nameWithOwner"]);
}

#[tokio::test]
async fn test_local_repo_outside_repository() {
  let failing = GitHubClient::with_executor(ScriptedExecutor::new().on("gh", &["repo"], CommandOutput::failure(1, "not a git repository")));
  assert!(matches!(failing.local_repo().await, Err(GitHubError::RepositoryNotFound)));

  let empty = GitHubClient::with_executor(ScriptedExecutor::new().on("gh", &["repo"], CommandOutput::success("")));
  assert!(matches!(empty.local_repo().await, Err(GitHubError::RepositoryNotFound)));
}

#[tokio::test]
async fn test_pr_diff_is_trimmed() {
  let executor = ScriptedExecutor::new().on("gh", &["pr", "diff", "7", "-R", "octo/hello"], CommandOutput::success(format!("{DIFF}\n")));
  let github = GitHubClient::with_executor(executor);

  assert_eq!(github.pr_diff("7", "octo/hello").await.unwrap(), DIFF);
}

#[tokio::test]
async fn test_update_pr_skips_missing_fields() {
  let executor = ScriptedExecutor::new().on("gh", &["pr", "edit"], CommandOutput::success(""));
  let github = GitHubClient::with_executor(executor.clone());

  let update = PrUpdate { pr: "7".into(), repo: "octo/hello".into(), title: Some("feat: x".into()), body: Some(String::new()) };
  github.update_pr(&update).await.unwrap();

  assert_eq!(executor.calls()[0].args, vec!["pr", "edit", "7", "-R", "octo/hello", "--title", "feat: x"]);
}

#[tokio::test]
async fn test_update_pr_with_title_and_body() {
  let executor = ScriptedExecutor::new().on("gh", &["pr", "edit"], CommandOutput::success(""));
  let github = GitHubClient::with_executor(executor.clone());

  let update = PrUpdate { pr: "7".into(), repo: "octo/hello".into(), title: Some("T".into()), body: Some("B".into()) };
  github.update_pr(&update).await.unwrap();

  assert_eq!(executor.calls()[0].args, vec!["pr", "edit", "7", "-R", "octo/hello", "--title", "T", "--body", "B"]);
}

#[tokio::test]
async fn test_list_pr_comments() {
  let json = r#"{"comments":[{"id":"IC_1","body":"first","author":{"login":"a"}},{"id":"IC_2","body":"second","author":{"login":"b"}}]}"#;
  let github = GitHubClient::with_executor(ScriptedExecutor::new().on("gh", &["pr", "view"], CommandOutput::success(json)));

  let comments = github.list_pr_comments("7", "octo/hello").await;

  assert_eq!(comments, vec![
    PrComment { id: "IC_1".into(), body: "first".into() },
    PrComment { id: "IC_2".into(), body: "second".into() },
  ]);
}

#[tokio::test]
async fn test_list_pr_comments_failure_is_empty() {
  let failing = GitHubClient::with_executor(ScriptedExecutor::new().on("gh", &["pr", "view"], CommandOutput::failure(1, "HTTP 404")));
  assert!(failing.list_pr_comments("7", "octo/hello").await.is_empty());

  let garbage = GitHubClient::with_executor(ScriptedExecutor::new().on("gh", &["pr", "view"], CommandOutput::success("not json")));
  assert!(garbage.list_pr_comments("7", "octo/hello").await.is_empty());
}

#[tokio::test]
async fn test_add_pr_comment() {
  let executor = ScriptedExecutor::new().on("gh", &["pr", "comment"], CommandOutput::success(""));
  let github = GitHubClient::with_executor(executor.clone());

  github.add_pr_comment("7", "octo/hello", "body").await.unwrap();

  assert_eq!(executor.calls()[0].args, vec!["pr", "comment", "7", "-R", "octo/hello", "--body", "body"]);
}

#[tokio::test]
async fn test_delete_pr_comment_uses_graphql() {
  let executor = ScriptedExecutor::new().on("gh", &["api", "graphql"], CommandOutput::success("{}"));
  let github = GitHubClient::with_executor(executor.clone());

  github.delete_pr_comment("IC_1").await;

  let args = &executor.calls()[0].args;
  assert_eq!(&args[..4], &["api", "graphql", "-f", "id=IC_1"]);
  assert!(args[5].contains("deleteIssueComment"));
}

#[tokio::test]
async fn test_delete_pr_comment_failure_is_swallowed() {
  let github = GitHubClient::with_executor(ScriptedExecutor::new().on("gh", &["api"], CommandOutput::failure(1, "not found")));
  github.delete_pr_comment("IC_gone").await;
}
