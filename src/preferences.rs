//! Per-user preferences stored at `~/.config/gitai/preferences.json`.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::LocalConfig;
use crate::model::ModelFamily;

const PREFERENCES_DIR: &str = ".config/gitai";
const PREFERENCES_FILE: &str = "preferences.json";

/// Commands that remember the model they last used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandName {
  Commit,
  Gh,
  Changelog
}

impl Display for CommandName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CommandName::Commit => f.write_str("commit"),
      CommandName::Gh => f.write_str("gh"),
      CommandName::Changelog => f.write_str("changelog")
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
  #[serde(default)]
  pub last_used_model_by_command: BTreeMap<CommandName, ModelFamily>,
  #[serde(default)]
  pub model_usage_counts:         BTreeMap<ModelFamily, u64>
}

/// Reads and writes [`UserPreferences`] at a fixed path.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
  path: PathBuf
}

impl PreferencesStore {
  /// Store in the user's home directory, if one can be determined.
  pub fn in_home() -> Option<Self> {
    home::home_dir().map(|home| Self::at(home.join(PREFERENCES_DIR).join(PREFERENCES_FILE)))
  }

  pub fn at(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &PathBuf {
    &self.path
  }

  /// Never fails: a missing or corrupt file yields default preferences.
  pub fn load(&self) -> UserPreferences {
    let contents = match fs::read_to_string(&self.path) {
      Ok(contents) => contents,
      Err(_) => return UserPreferences::default()
    };

    serde_json::from_str(&contents).unwrap_or_else(|err| {
      log::warn!("Ignoring unreadable preferences at {}: {err}", self.path.display());
      UserPreferences::default()
    })
  }

  pub fn save(&self, preferences: &UserPreferences) -> Result<()> {
    if let Some(dir) = self.path.parent() {
      fs::create_dir_all(dir).with_context(|| format!("Failed to create preferences directory at {}", dir.display()))?;
    }

    let contents = serde_json::to_string_pretty(preferences).context("Failed to serialize preferences")?;
    fs::write(&self.path, contents).with_context(|| format!("Failed to write preferences to {}", self.path.display()))
  }

  /// Remembers `model` as the last one used for `command` and bumps its usage count.
  pub fn record_model_usage(&self, command: CommandName, model: ModelFamily) -> Result<()> {
    let mut preferences = self.load();
    preferences.last_used_model_by_command.insert(command, model);
    *preferences.model_usage_counts.entry(model).or_default() += 1;
    self.save(&preferences)
  }
}

/// Picks the model for a command: explicit flag, then the project's
/// `defaultModel`, then the last model used for the command, then the default.
pub fn resolve_model(flag: Option<ModelFamily>, config: &LocalConfig, preferences: &UserPreferences, command: CommandName) -> ModelFamily {
  if let Some(model) = flag {
    return model;
  }

  let configured = config
    .default_model
    .as_deref()
    .and_then(|name| match name.parse::<ModelFamily>() {
      Ok(model) => Some(model),
      Err(err) => {
        log::warn!("Ignoring defaultModel in project config: {err}");
        None
      }
    });

  configured
    .or_else(|| preferences.last_used_model_by_command.get(&command).copied())
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn store(dir: &TempDir) -> PreferencesStore {
    PreferencesStore::at(dir.path().join("nested").join(PREFERENCES_FILE))
  }

  #[test]
  fn test_load_missing_is_default() {
    let dir = TempDir::new().unwrap();
    assert_eq!(store(&dir).load(), UserPreferences::default());
  }

  #[test]
  fn test_load_corrupt_is_default() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), "[1, 2").unwrap();

    assert_eq!(store.load(), UserPreferences::default());
  }

  #[test]
  fn test_record_model_usage() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    store.record_model_usage(CommandName::Commit, ModelFamily::Haiku45).unwrap();
    store.record_model_usage(CommandName::Gh, ModelFamily::Haiku45).unwrap();
    store.record_model_usage(CommandName::Commit, ModelFamily::Gpt52).unwrap();

    let preferences = store.load();
    assert_eq!(preferences.last_used_model_by_command[&CommandName::Commit], ModelFamily::Gpt52);
    assert_eq!(preferences.last_used_model_by_command[&CommandName::Gh], ModelFamily::Haiku45);
    assert_eq!(preferences.model_usage_counts[&ModelFamily::Haiku45], 2);
    assert_eq!(preferences.model_usage_counts[&ModelFamily::Gpt52], 1);
  }

  #[test]
  fn test_file_uses_camel_case_keys() {
    let mut preferences = UserPreferences::default();
    preferences.last_used_model_by_command.insert(CommandName::Changelog, ModelFamily::Opus45);

    let json = serde_json::to_string(&preferences).unwrap();
    assert!(json.contains(r#""lastUsedModelByCommand":{"changelog":"opus-4.5"}"#));
  }

  #[test]
  fn test_resolve_model_precedence() {
    let mut preferences = UserPreferences::default();
    preferences.last_used_model_by_command.insert(CommandName::Gh, ModelFamily::Sonnet45);
    let config = LocalConfig { default_model: Some("gpt-5.1".into()), ..Default::default() };

    assert_eq!(resolve_model(Some(ModelFamily::Haiku45), &config, &preferences, CommandName::Gh), ModelFamily::Haiku45);
    assert_eq!(resolve_model(None, &config, &preferences, CommandName::Gh), ModelFamily::Gpt51);
    assert_eq!(resolve_model(None, &LocalConfig::default(), &preferences, CommandName::Gh), ModelFamily::Sonnet45);
    assert_eq!(resolve_model(None, &LocalConfig::default(), &preferences, CommandName::Commit), ModelFamily::Gemini3Pro);
  }

  #[test]
  fn test_invalid_default_model_falls_through() {
    let config = LocalConfig { default_model: Some("gpt-2".into()), ..Default::default() };
    let model = resolve_model(None, &config, &UserPreferences::default(), CommandName::Changelog);
    assert_eq!(model, ModelFamily::Gemini3Pro);
  }
}
