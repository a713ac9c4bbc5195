use anyhow::{Context, Result};

use super::format::{format_pr_description, format_review_as_markdown};
use super::prompts;
use super::types::{Changelog, CommitMessage, PrDetails, PrReviewDetails, PrTitle};
use crate::diff::{filter_config_files, transform_diff_for_llm};
use crate::git::GitCommit;
use crate::llm::{generate_object, LanguageModel, ProviderRouter, ResponseSchema};
use crate::model::ModelFamily;
use crate::profile;

/// Title and rendered body for a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrContent {
  pub title: String,
  pub body:  String
}

/// Filters configuration files out of `raw_diff` and renders the rest in the
/// model-facing format. Falls back to the filtered raw diff when nothing
/// could be parsed.
pub fn prepare_diff(raw_diff: &str) -> String {
  let filtered = filter_config_files(raw_diff);
  let transformed = transform_diff_for_llm(&filtered);

  if transformed.is_empty() {
    log::debug!("Diff transform produced no output, using the filtered raw diff");
    filtered
  } else {
    transformed
  }
}

/// Produces commit messages, PR content, reviews and changelogs with one model.
pub struct Generator<M = ProviderRouter> {
  llm:     M,
  model:   ModelFamily,
  context: Option<String>
}

impl<M: LanguageModel> Generator<M> {
  pub fn new(llm: M, model: ModelFamily) -> Self {
    Self { llm, model, context: None }
  }

  /// Extra user guidance added to every prompt.
  pub fn with_context(mut self, context: Option<String>) -> Self {
    self.context = context.filter(|ctx| !ctx.trim().is_empty());
    self
  }

  pub fn model(&self) -> ModelFamily {
    self.model
  }

  fn context(&self) -> Option<&str> {
    self.context.as_deref()
  }

  async fn generate<T: ResponseSchema>(&self, prompt: String, task: &str) -> Result<T> {
    log::debug!("Generating {} with {}", T::NAME, self.model);
    generate_object::<T, M>(&self.llm, self.model, prompt)
      .await
      .with_context(|| format!("Failed to generate {task}"))
  }

  pub async fn generate_commit_message(&self, raw_diff: &str) -> Result<String> {
    profile!("Generate commit message");
    let prompt = prompts::commit_message_prompt(&prepare_diff(raw_diff), self.context());
    let generated: CommitMessage = self.generate(prompt, "commit message").await?;
    Ok(generated.message.trim().to_string())
  }

  pub async fn generate_pr_details(&self, raw_diff: &str) -> Result<PrContent> {
    profile!("Generate PR details");
    let prompt = prompts::pr_details_prompt(&prepare_diff(raw_diff), self.context());
    let details: PrDetails = self.generate(prompt, "PR details").await?;

    Ok(PrContent { title: details.title.trim().to_string(), body: format_pr_description(&details) })
  }

  pub async fn generate_title(&self, raw_diff: &str) -> Result<String> {
    profile!("Generate PR title");
    let prompt = prompts::title_prompt(&prepare_diff(raw_diff), self.context());
    let generated: PrTitle = self.generate(prompt, "PR title").await?;
    Ok(generated.title.trim().to_string())
  }

  /// Review rendered as a markdown comment tagged with `username`.
  pub async fn generate_review(&self, raw_diff: &str, username: &str) -> Result<String> {
    profile!("Generate review");
    let prompt = prompts::review_prompt(&prepare_diff(raw_diff), self.context());
    let review: PrReviewDetails = self.generate(prompt, "review").await?;
    Ok(format_review_as_markdown(&review, username))
  }

  pub async fn generate_changelog(&self, commits: &[GitCommit]) -> Result<String> {
    profile!("Generate changelog");
    let prompt = prompts::changelog_prompt(commits, self.context());
    let generated: Changelog = self.generate(prompt, "changelog").await?;
    Ok(generated.changelog.trim().to_string())
  }
}
