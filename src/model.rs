use std::fmt::{self, Display};
use std::str::FromStr;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

// Model family identifiers as accepted on the command line
const MODEL_GEMINI_3_PRO: &str = "gemini-3-pro";
const MODEL_GEMINI_3_FLASH: &str = "gemini-3-flash";
const MODEL_OPUS_4_5: &str = "opus-4.5";
const MODEL_SONNET_4_5: &str = "sonnet-4.5";
const MODEL_HAIKU_4_5: &str = "haiku-4.5";
const MODEL_GPT_5_2: &str = "gpt-5.2";
const MODEL_GPT_5_1: &str = "gpt-5.1";

/// The hosted service a model family is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
  Google,
  Anthropic,
  OpenAi
}

impl Provider {
  /// Environment variable holding the provider's API key.
  pub fn api_key_var(&self) -> &'static str {
    match self {
      Provider::Google => "GOOGLE_AI_API_KEY",
      Provider::Anthropic => "ANTHROPIC_API_KEY",
      Provider::OpenAi => "OPENAI_API_KEY"
    }
  }
}

impl Display for Provider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Provider::Google => f.write_str("Google"),
      Provider::Anthropic => f.write_str("Anthropic"),
      Provider::OpenAi => f.write_str("OpenAI")
    }
  }
}

/// Represents the AI model families available for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum ModelFamily {
  /// Default model
  #[default]
  #[serde(rename = "gemini-3-pro")]
  Gemini3Pro,
  #[serde(rename = "gemini-3-flash")]
  Gemini3Flash,
  #[serde(rename = "opus-4.5")]
  Opus45,
  #[serde(rename = "sonnet-4.5")]
  Sonnet45,
  #[serde(rename = "haiku-4.5")]
  Haiku45,
  #[serde(rename = "gpt-5.2")]
  Gpt52,
  #[serde(rename = "gpt-5.1")]
  Gpt51
}

impl ModelFamily {
  pub const ALL: [ModelFamily; 7] = [
    ModelFamily::Gemini3Pro,
    ModelFamily::Gemini3Flash,
    ModelFamily::Opus45,
    ModelFamily::Sonnet45,
    ModelFamily::Haiku45,
    ModelFamily::Gpt52,
    ModelFamily::Gpt51
  ];

  pub fn provider(&self) -> Provider {
    match self {
      ModelFamily::Gemini3Pro | ModelFamily::Gemini3Flash => Provider::Google,
      ModelFamily::Opus45 | ModelFamily::Sonnet45 | ModelFamily::Haiku45 => Provider::Anthropic,
      ModelFamily::Gpt52 | ModelFamily::Gpt51 => Provider::OpenAi
    }
  }

  /// The identifier sent to the provider's API.
  pub fn model_id(&self) -> &'static str {
    match self {
      ModelFamily::Gemini3Pro => "gemini-3-pro-preview",
      ModelFamily::Gemini3Flash => "gemini-3-flash-preview",
      ModelFamily::Opus45 => "claude-opus-4-5",
      ModelFamily::Sonnet45 => "claude-sonnet-4-5",
      ModelFamily::Haiku45 => "claude-haiku-4-5",
      ModelFamily::Gpt52 => "gpt-5.2",
      ModelFamily::Gpt51 => "gpt-5.1"
    }
  }

  /// Output token cap for providers that require one.
  pub fn max_output_tokens(&self) -> u32 {
    match self {
      ModelFamily::Opus45 => 16_000,
      _ => 64_000
    }
  }
}

impl From<&ModelFamily> for &str {
  fn from(model: &ModelFamily) -> Self {
    match model {
      ModelFamily::Gemini3Pro => MODEL_GEMINI_3_PRO,
      ModelFamily::Gemini3Flash => MODEL_GEMINI_3_FLASH,
      ModelFamily::Opus45 => MODEL_OPUS_4_5,
      ModelFamily::Sonnet45 => MODEL_SONNET_4_5,
      ModelFamily::Haiku45 => MODEL_HAIKU_4_5,
      ModelFamily::Gpt52 => MODEL_GPT_5_2,
      ModelFamily::Gpt51 => MODEL_GPT_5_1
    }
  }
}

impl FromStr for ModelFamily {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self> {
    let name = s.trim();
    match ModelFamily::ALL
      .iter()
      .find(|model| <&str>::from(*model).eq_ignore_ascii_case(name))
    {
      Some(model) => Ok(*model),
      None => {
        let valid: Vec<&str> = ModelFamily::ALL.iter().map(<&str>::from).collect();
        bail!("Invalid model name: {name} (expected one of: {})", valid.join(", "))
      }
    }
  }
}

impl Display for ModelFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", <&str>::from(self))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_round_trips_through_display() {
    for model in ModelFamily::ALL {
      assert_eq!(model.to_string().parse::<ModelFamily>().unwrap(), model);
    }
  }

  #[test]
  fn test_parse_is_case_insensitive_and_trimmed() {
    assert_eq!(" Sonnet-4.5 ".parse::<ModelFamily>().unwrap(), ModelFamily::Sonnet45);
  }

  #[test]
  fn test_parse_rejects_unknown() {
    let err = "gpt-2".parse::<ModelFamily>().unwrap_err();
    assert!(err.to_string().contains("gemini-3-pro"));
  }

  #[test]
  fn test_serde_uses_cli_names() {
    assert_eq!(serde_json::to_string(&ModelFamily::Opus45).unwrap(), "\"opus-4.5\"");
    let model: ModelFamily = serde_json::from_str("\"gpt-5.1\"").unwrap();
    assert_eq!(model, ModelFamily::Gpt51);
  }

  #[test]
  fn test_providers() {
    assert_eq!(ModelFamily::default(), ModelFamily::Gemini3Pro);
    assert_eq!(ModelFamily::Gemini3Flash.provider(), Provider::Google);
    assert_eq!(ModelFamily::Haiku45.provider(), Provider::Anthropic);
    assert_eq!(ModelFamily::Gpt52.provider().api_key_var(), "OPENAI_API_KEY");
  }

  #[test]
  fn test_max_output_tokens() {
    assert_eq!(ModelFamily::Opus45.max_output_tokens(), 16_000);
    assert_eq!(ModelFamily::Sonnet45.max_output_tokens(), 64_000);
    assert_eq!(ModelFamily::Haiku45.max_output_tokens(), 64_000);
  }
}
