use anyhow::{bail, Context, Result};

use crate::cli::ChangelogArgs;
use crate::config::LocalConfig;
use crate::generation::Generator;
use crate::git::GitClient;
use crate::llm::LanguageModel;
use crate::preferences::CommandName;
use crate::process::CommandExecutor;
use crate::style;

const RULE_WIDTH: usize = 80;

pub async fn run(args: ChangelogArgs) -> Result<()> {
  let config = LocalConfig::load();
  let generator = super::generator_for(CommandName::Changelog, &args.generation, &config);

  let changelog = execute(&GitClient::new(), &generator, &args).await?;

  let rule = "=".repeat(RULE_WIDTH);
  println!("\n{rule}\nGENERATED CHANGELOG\n{rule}\n");
  println!("{changelog}");
  Ok(())
}

pub async fn execute<E, M>(git: &GitClient<E>, generator: &Generator<M>, args: &ChangelogArgs) -> Result<String>
where
  E: CommandExecutor,
  M: LanguageModel
{
  log::info!("Generating changelog for range: {}..{}", args.from, args.to);

  let commits = git
    .commit_range(&args.from, &args.to)
    .await
    .with_context(|| format!("Failed to read commits in {}..{}", args.from, args.to))?;

  if commits.is_empty() {
    bail!("No commits found in range {}..{}. Please check your commit hashes.", args.from, args.to);
  }

  log::info!("Found {} commits. Generating changelog...", commits.len());

  let pb = style::spinner(format!("Generating changelog with {}...", generator.model()))?;
  let changelog = generator.generate_changelog(&commits).await;
  pb.finish_and_clear();
  changelog
}
