use std::env;
use std::path::{Path, PathBuf};

use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};

use crate::model::Provider;

/// Project directory holding `config.json` and the `rules/` folder.
pub const PROJECT_DIR: &str = ".gitai";
const CONFIG_FILE: &str = "config.json";
const ENV_DEFAULT_MODEL: &str = "GITAI_DEFAULT_MODEL";
const ENV_RULES_TARGET: &str = "GITAI_RULES_TARGET_FILE";

// The config crate may lowercase keys, hence the aliases
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesConfig {
  #[serde(default, alias = "targetfile")]
  pub target_file: Option<String>
}

/// Per-project settings from `.gitai/config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalConfig {
  #[serde(default)]
  pub rules:         RulesConfig,
  #[serde(default, alias = "defaultmodel")]
  pub default_model: Option<String>
}

impl LocalConfig {
  /// Loads the config of the project in the current directory.
  pub fn load() -> Self {
    match env::current_dir() {
      Ok(dir) => Self::load_from(&dir),
      Err(err) => {
        log::warn!("Failed to read current directory: {err}");
        Self::default()
      }
    }
  }

  /// Loads `<root>/.gitai/config.json`. A missing file yields defaults, an
  /// unreadable one is logged and also yields defaults.
  pub fn load_from(root: &Path) -> Self {
    let path = config_path(root);

    let built = Config::builder()
      .add_source(config::File::from(path.as_path()).format(FileFormat::Json).required(false))
      .set_override_option("defaultModel", non_empty_env(ENV_DEFAULT_MODEL))
      .and_then(|builder| builder.set_override_option("rules.targetFile", non_empty_env(ENV_RULES_TARGET)))
      .and_then(|builder| builder.build());

    match built.and_then(|config| config.try_deserialize::<LocalConfig>()) {
      Ok(config) => {
        log::debug!("Loaded project config: {config:?}");
        config
      }
      Err(err) => {
        log::warn!("Failed to read {}: {err}", path.display());
        Self::default()
      }
    }
  }
}

pub fn config_path(root: &Path) -> PathBuf {
  root.join(PROJECT_DIR).join(CONFIG_FILE)
}

/// The provider's API key from the environment, ignoring empty values.
pub fn api_key(provider: Provider) -> Option<String> {
  non_empty_env(provider.api_key_var())
}

fn non_empty_env(var: &str) -> Option<String> {
  env::var(var)
    .ok()
    .map(|value| value.trim().to_string())
    .filter(|value| !value.is_empty())
}
