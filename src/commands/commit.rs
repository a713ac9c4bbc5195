use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::CommitArgs;
use crate::config::LocalConfig;
use crate::generation::Generator;
use crate::git::GitClient;
use crate::llm::LanguageModel;
use crate::preferences::CommandName;
use crate::process::CommandExecutor;
use crate::style::{self, CHECK};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
  NothingStaged,
  Cancelled(String),
  Committed(String)
}

pub async fn run(args: CommitArgs) -> Result<()> {
  let config = LocalConfig::load();
  let generator = super::generator_for(CommandName::Commit, &args.generation, &config);
  let confirm = super::confirm_or_yes(args.yes);

  execute(&GitClient::new(), &generator, &args, confirm).await.map(|_| ())
}

pub async fn execute<E, M, F>(git: &GitClient<E>, generator: &Generator<M>, args: &CommitArgs, confirm: F) -> Result<CommitOutcome>
where
  E: CommandExecutor,
  M: LanguageModel,
  F: FnOnce(&str) -> Result<bool>
{
  let diff = git
    .staged_diff(args.context_lines)
    .await
    .context("Failed to read staged changes")?;

  if diff.is_empty() {
    log::info!("No staged changes found. Nothing to commit.");
    return Ok(CommitOutcome::NothingStaged);
  }

  let pb = style::spinner(format!("Generating commit message with {}...", generator.model()))?;
  let message = generator.generate_commit_message(&diff).await;
  pb.finish_and_clear();
  let message = message?;

  println!("\n{}\n", message.green());

  if !confirm("Would you like to commit with this message?")? {
    log::info!("Commit cancelled.");
    return Ok(CommitOutcome::Cancelled(message));
  }

  git.commit(&message).await.context("Failed to commit")?;
  log::info!("{CHECK}Successfully committed changes!");
  Ok(CommitOutcome::Committed(message))
}
