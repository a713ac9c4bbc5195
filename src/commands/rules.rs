use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::cli::RulesArgs;
use crate::config::{LocalConfig, PROJECT_DIR};
use crate::style::{Styled, CHECK};

const RULES_DIR: &str = "rules";
const DEFAULT_TARGET: &str = "CLAUDE.local.md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesOutcome {
  NoRuleFiles,
  Cancelled,
  Applied { rule: String, target: PathBuf }
}

pub fn run(args: RulesArgs) -> Result<()> {
  let root = std::env::current_dir().context("Failed to get current directory")?;
  let config = LocalConfig::load_from(&root);
  let confirm = super::confirm_or_yes(args.yes);

  execute(&root, &config, &args, confirm).map(|_| ())
}

pub fn execute<F>(root: &Path, config: &LocalConfig, args: &RulesArgs, confirm: F) -> Result<RulesOutcome>
where
  F: FnOnce(&str) -> Result<bool>
{
  let project_dir = root.join(PROJECT_DIR);
  let rules_dir = project_dir.join(RULES_DIR);

  log::debug!("Ensuring {} exists...", project_dir.display());
  if let Err(err) = fs::create_dir_all(&project_dir) {
    log::debug!("Could not create {}: {err}", project_dir.display());
  }

  let rule_files = list_rule_files(&rules_dir);
  if rule_files.is_empty() {
    log::error!(
      "No rule files found in {dir}/\n• Please create some .md files in {dir}/ to define your rules.\n• Example: echo \"Your rules content here\" > {dir}/my-rules.md",
      dir = rules_dir.relative_path().display()
    );
    return Ok(RulesOutcome::NoRuleFiles);
  }

  log::debug!("Found {} rule file(s):", rule_files.len());
  for file in &rule_files {
    log::info!("  - {file}");
  }

  let rule = select_rule(&rule_files, args.rule.as_deref())?;
  log::info!("Selected rule file: {rule}");

  let target = resolve_target(args.target.as_deref(), config);
  let target_path = root.join(&target);

  if !confirm(&format!("Write rules to {target}?"))? {
    log::info!("Operation cancelled.");
    return Ok(RulesOutcome::Cancelled);
  }

  let rule_path = rules_dir.join(&rule);
  let content = fs::read_to_string(&rule_path).with_context(|| format!("Failed to read rule file: {}", rule_path.display()))?;

  log::debug!("Writing rules to {target}...");
  fs::write(&target_path, content).with_context(|| format!("Failed to write to target file: {target}"))?;

  log::info!("{CHECK}Successfully applied rules from {rule} to {target}!");
  Ok(RulesOutcome::Applied { rule, target: target_path })
}

/// Sorted names of the `.md` files in `dir`; empty if it cannot be read.
fn list_rule_files(dir: &Path) -> Vec<String> {
  let Ok(entries) = fs::read_dir(dir) else {
    return Vec::new();
  };

  let mut files: Vec<String> = entries
    .filter_map(|entry| entry.ok())
    .filter(|entry| entry.path().is_file())
    .filter_map(|entry| entry.file_name().into_string().ok())
    .filter(|name| name.ends_with(".md"))
    .collect();

  files.sort();
  files
}

/// The requested rule (with or without `.md`), or the only one available.
fn select_rule(files: &[String], requested: Option<&str>) -> Result<String> {
  match (requested, files) {
    (Some(name), _) => {
      let file_name = if name.ends_with(".md") { name.to_string() } else { format!("{name}.md") };
      if !files.contains(&file_name) {
        bail!("Rule file {file_name} not found. Available rules: {}", files.join(", "));
      }
      Ok(file_name)
    }
    (None, [only]) => Ok(only.clone()),
    (None, _) => bail!("Several rule files found, choose one with --rule: {}", files.join(", "))
  }
}

/// Target file: CLI flag, then `rules.targetFile` from the project config, then the default.
fn resolve_target(cli_target: Option<&str>, config: &LocalConfig) -> String {
  if let Some(target) = cli_target {
    log::debug!("Using CLI-provided target file: {target}");
    return target.to_string();
  }

  match config.rules.target_file.as_deref() {
    Some(target) => {
      log::debug!("Using configured target file: {target}");
      target.to_string()
    }
    None => DEFAULT_TARGET.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::RulesConfig;

  #[test]
  fn test_select_rule() {
    let files = vec!["backend.md".to_string(), "frontend.md".to_string()];
    assert_eq!(select_rule(&files, Some("frontend")).unwrap(), "frontend.md");
    assert_eq!(select_rule(&files, Some("backend.md")).unwrap(), "backend.md");
    assert!(select_rule(&files, Some("mobile")).is_err());
    assert!(select_rule(&files, None).is_err());
    assert_eq!(select_rule(&files[..1], None).unwrap(), "backend.md");
  }

  #[test]
  fn test_resolve_target_precedence() {
    let config = LocalConfig { rules: RulesConfig { target_file: Some("AGENTS.md".into()) }, ..Default::default() };

    assert_eq!(resolve_target(Some("OTHER.md"), &config), "OTHER.md");
    assert_eq!(resolve_target(None, &config), "AGENTS.md");
    assert_eq!(resolve_target(None, &LocalConfig::default()), DEFAULT_TARGET);
  }
}
