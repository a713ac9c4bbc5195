use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::ModelFamily;

#[derive(Parser, Debug)]
#[command(name = "git-gen", author, version, about = "Generates commit messages, PR descriptions, reviews and changelogs with AI")]
pub struct Cli {
  /// Enables verbose logging
  #[arg(short, long, global = true, default_value_t = false)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Command
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Generate a commit message for the staged changes and commit
  Commit(CommitArgs),
  /// Generate a title, description or review for a GitHub pull request
  Gh(GhArgs),
  /// Generate a changelog for a range of commits
  Changelog(ChangelogArgs),
  /// Apply a rule file from .gitai/rules to a target file
  Rules(RulesArgs)
}

/// Options shared by the generating commands.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerationArgs {
  /// Extra context for the model
  #[arg(short, long)]
  pub context: Option<String>,

  /// Model to use: gemini-3-pro (default), gemini-3-flash, opus-4.5, sonnet-4.5, haiku-4.5, gpt-5.2 or gpt-5.1
  #[arg(short, long)]
  pub model: Option<ModelFamily>
}

#[derive(Args, Debug, Clone, Default)]
pub struct CommitArgs {
  #[command(flatten)]
  pub generation: GenerationArgs,

  /// Number of context lines for git diff (default: 3)
  #[arg(long, alias = "cl")]
  pub context_lines: Option<u32>,

  /// Commit without asking for confirmation
  #[arg(short, long, default_value_t = false)]
  pub yes: bool
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GhAction {
  /// Generate title and description
  #[default]
  Details,
  /// Generate title only
  Title,
  /// Generate a review and post it as a comment
  Review
}

#[derive(Args, Debug, Clone, Default)]
pub struct GhArgs {
  /// The PR number
  #[arg(long)]
  pub pr: u64,

  /// Repository as owner/name (defaults to the current repository)
  #[arg(long)]
  pub repo: Option<String>,

  /// What to generate
  #[arg(short, long, value_enum, default_value_t = GhAction::Details)]
  pub action: GhAction,

  #[command(flatten)]
  pub generation: GenerationArgs
}

#[derive(Args, Debug, Clone, Default)]
pub struct ChangelogArgs {
  /// Starting commit of the range (exclusive)
  #[arg(long)]
  pub from: String,

  /// Ending commit of the range
  #[arg(long, default_value = "HEAD")]
  pub to: String,

  #[command(flatten)]
  pub generation: GenerationArgs
}

#[derive(Args, Debug, Clone, Default)]
pub struct RulesArgs {
  /// Rule file in .gitai/rules to apply (required when there are several)
  #[arg(long)]
  pub rule: Option<String>,

  /// File to write the rules to (overrides the project config)
  #[arg(long)]
  pub target: Option<String>,

  /// Write without asking for confirmation
  #[arg(short, long, default_value_t = false)]
  pub yes: bool
}
