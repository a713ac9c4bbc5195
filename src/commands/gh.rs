use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::{GhAction, GhArgs};
use crate::config::LocalConfig;
use crate::generation::{review_comment_tag, Generator};
use crate::git::GitClient;
use crate::github::{GitHubClient, PrUpdate};
use crate::llm::LanguageModel;
use crate::preferences::CommandName;
use crate::process::CommandExecutor;
use crate::style::{self, CHECK};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GhOutcome {
  EmptyDiff,
  Updated(PrUpdate),
  Reviewed {
    comment:          String,
    replaced_comment: Option<String>
  }
}

pub async fn run(args: GhArgs) -> Result<()> {
  let config = LocalConfig::load();
  let generator = super::generator_for(CommandName::Gh, &args.generation, &config);

  execute(&GitHubClient::new(), &GitClient::new(), &generator, &args).await.map(|_| ())
}

pub async fn execute<G, E, M>(github: &GitHubClient<G>, git: &GitClient<E>, generator: &Generator<M>, args: &GhArgs) -> Result<GhOutcome>
where
  G: CommandExecutor,
  E: CommandExecutor,
  M: LanguageModel
{
  let pr = args.pr.to_string();

  let repo = match &args.repo {
    Some(repo) => repo.clone(),
    None => {
      log::info!("Detecting current repository...");
      github.local_repo().await?
    }
  };
  log::info!("Using repository: {repo}");

  log::info!("Fetching diff for PR #{pr}...");
  let diff = github
    .pr_diff(&pr, &repo)
    .await
    .with_context(|| format!("Failed to fetch diff for PR #{pr}"))?;
  log::debug!("Diff for PR #{pr}: {diff}");

  if diff.is_empty() {
    log::info!("PR diff is empty. Nothing to generate.");
    return Ok(GhOutcome::EmptyDiff);
  }

  match args.action {
    GhAction::Details => {
      let pb = style::spinner(format!("Generating PR title and description with {}...", generator.model()))?;
      let details = generator.generate_pr_details(&diff).await;
      pb.finish_and_clear();
      let details = details?;

      println!("\n{}\n\n{}\n", details.title.green().bold(), details.body);

      let update = PrUpdate { pr: pr.clone(), repo, title: Some(details.title), body: Some(details.body) };
      apply_update(github, update).await
    }

    GhAction::Title => {
      let pb = style::spinner(format!("Generating PR title with {}...", generator.model()))?;
      let title = generator.generate_title(&diff).await;
      pb.finish_and_clear();
      let title = title?;

      println!("\n{}\n", title.green().bold());

      let update = PrUpdate { pr: pr.clone(), repo, title: Some(title), body: None };
      apply_update(github, update).await
    }

    GhAction::Review => review(github, git, generator, &pr, &repo, &diff).await
  }
}

async fn apply_update<G: CommandExecutor>(github: &GitHubClient<G>, update: PrUpdate) -> Result<GhOutcome> {
  log::info!("Updating PR #{} on GitHub...", update.pr);
  github
    .update_pr(&update)
    .await
    .with_context(|| format!("Failed to update PR #{}", update.pr))?;

  log::info!("{CHECK}Successfully updated PR #{} on GitHub!", update.pr);
  Ok(GhOutcome::Updated(update))
}

/// Posts a fresh review comment, then removes this user's previous one.
async fn review<G, E, M>(github: &GitHubClient<G>, git: &GitClient<E>, generator: &Generator<M>, pr: &str, repo: &str, diff: &str) -> Result<GhOutcome>
where
  G: CommandExecutor,
  E: CommandExecutor,
  M: LanguageModel
{
  let username = git.user_name().await;
  let tag = review_comment_tag(&username);

  log::info!("Listing comments for PR #{pr}...");
  let comments = github.list_pr_comments(pr, repo).await;
  log::debug!("Found {} comments for PR #{pr}", comments.len());
  let previous = comments.into_iter().find(|comment| comment.body.contains(&tag));

  let pb = style::spinner(format!("Generating review with {}...", generator.model()))?;
  let markdown = generator.generate_review(diff, &username).await;
  pb.finish_and_clear();
  let markdown = markdown?;

  println!("\nGenerated Review:\n{markdown}\n");

  log::info!("Adding new review comment to PR #{pr}...");
  github
    .add_pr_comment(pr, repo, &markdown)
    .await
    .with_context(|| format!("Failed to comment on PR #{pr}"))?;
  log::info!("{CHECK}Successfully added review comment to PR #{pr}!");

  let replaced_comment = match previous {
    Some(comment) => {
      log::info!("Deleting previous review comment...");
      github.delete_pr_comment(&comment.id).await;
      Some(comment.id)
    }
    None => None
  };

  Ok(GhOutcome::Reviewed { comment: markdown, replaced_comment })
}
