//! Language model access.
//!
//! Every generation asks the model for a single JSON object matching a
//! schema. [`ProviderRouter`] sends the request to the provider serving the
//! selected [`ModelFamily`].

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::model::{ModelFamily, Provider};
use crate::{anthropic, config, google, openai, profile};

#[derive(Error, Debug)]
pub enum LlmError {
  #[error("{provider} API key not found. Set the {var} environment variable")]
  MissingApiKey {
    provider: Provider,
    var:      &'static str
  },

  #[error("Network error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{provider} API error ({status}): {message}")]
  Api {
    provider: Provider,
    status:   u16,
    message:  String
  },

  #[error("OpenAI API error: {0}")]
  OpenAi(#[from] async_openai::error::OpenAIError),

  #[error("{0} returned no content")]
  EmptyResponse(Provider)
}

pub type Result<T, E = LlmError> = std::result::Result<T, E>;

/// A request for one JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRequest {
  pub model:       ModelFamily,
  pub prompt:      String,
  pub schema_name: &'static str,
  pub schema:      Value
}

impl JsonRequest {
  /// Instruction appended for providers without native schema enforcement.
  pub fn schema_instruction(&self) -> String {
    format!(
      "Respond with a single JSON object named {} that matches this JSON schema. Output only the JSON, without markdown fences or commentary.\n\n{}",
      self.schema_name,
      serde_json::to_string_pretty(&self.schema).unwrap_or_default()
    )
  }
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
  /// Returns the raw JSON text produced by the model.
  async fn generate_json(&self, request: &JsonRequest) -> Result<String>;
}

/// A JSON object the model can be asked to produce.
pub trait ResponseSchema: DeserializeOwned {
  const NAME: &'static str;

  /// JSON schema describing the object.
  fn schema() -> Value;
}

/// Asks `llm` for a `T` and decodes the answer.
pub async fn generate_object<T, M>(llm: &M, model: ModelFamily, prompt: String) -> anyhow::Result<T>
where
  T: ResponseSchema,
  M: LanguageModel + ?Sized
{
  let request = JsonRequest { model, prompt, schema_name: T::NAME, schema: T::schema() };
  let raw = llm.generate_json(&request).await?;

  serde_json::from_str(strip_code_fences(&raw)).with_context(|| format!("Model response is not a valid {}", T::NAME))
}

/// Dispatches requests to the provider of the requested model family.
#[derive(Debug, Clone, Default)]
pub struct ProviderRouter {
  http: reqwest::Client
}

impl ProviderRouter {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl LanguageModel for ProviderRouter {
  async fn generate_json(&self, request: &JsonRequest) -> Result<String> {
    profile!("Model request");
    let provider = request.model.provider();
    let api_key = config::api_key(provider).ok_or(LlmError::MissingApiKey { provider, var: provider.api_key_var() })?;

    log::debug!("Requesting {} from {} ({})", request.schema_name, provider, request.model.model_id());

    let content = match provider {
      Provider::OpenAi => openai::generate_json(&api_key, request).await?,
      Provider::Anthropic => anthropic::generate_json(&self.http, &api_key, request).await?,
      Provider::Google => google::generate_json(&self.http, &api_key, request).await?
    };

    if content.trim().is_empty() {
      return Err(LlmError::EmptyResponse(provider));
    }

    log::debug!("Model response: {content}");
    Ok(content)
  }
}

/// Strips a surrounding markdown code fence (```` ```json ... ``` ````) if present.
pub fn strip_code_fences(text: &str) -> &str {
  let trimmed = text.trim();
  let Some(rest) = trimmed.strip_prefix("```") else {
    return trimmed;
  };

  // Drop the info string (e.g. `json`) on the opening line
  let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or_default();
  body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
