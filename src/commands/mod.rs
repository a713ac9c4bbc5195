//! Command handlers.
//!
//! Each command exposes `run`, which wires the real git/gh executors, the
//! provider router and the terminal, and `execute`, which takes those as
//! arguments so the flow can be driven from tests.

pub mod changelog;
pub mod commit;
pub mod gh;
pub mod rules;

use anyhow::Result;

use crate::cli::GenerationArgs;
use crate::config::LocalConfig;
use crate::generation::Generator;
use crate::llm::ProviderRouter;
use crate::model::ModelFamily;
use crate::preferences::{resolve_model, CommandName, PreferencesStore};

/// Resolves the model for `command`, remembers the choice and builds a generator.
pub(crate) fn generator_for(command: CommandName, args: &GenerationArgs, config: &LocalConfig) -> Generator<ProviderRouter> {
  let store = PreferencesStore::in_home();
  let preferences = store.as_ref().map(PreferencesStore::load).unwrap_or_default();
  let model = resolve_model(args.model, config, &preferences, command);

  log::debug!("Using model {model} for {command}");
  remember_model(store.as_ref(), command, model);

  Generator::new(ProviderRouter::new(), model).with_context(args.context.clone())
}

fn remember_model(store: Option<&PreferencesStore>, command: CommandName, model: ModelFamily) {
  let Some(store) = store else {
    log::debug!("No home directory, model preference not saved");
    return;
  };

  if let Err(err) = store.record_model_usage(command, model) {
    log::warn!("Failed to save model preference: {err:#}");
  }
}

/// Terminal confirmation, skipped when `yes` is set.
pub(crate) fn confirm_or_yes(yes: bool) -> impl FnOnce(&str) -> Result<bool> {
  move |question: &str| if yes { Ok(true) } else { crate::style::confirm(question) }
}
