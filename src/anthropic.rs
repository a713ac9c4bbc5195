use serde::{Deserialize, Serialize};

use crate::llm::{JsonRequest, LlmError, Result};
use crate::model::Provider;
use crate::profile;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const THINKING_BUDGET_TOKENS: u32 = 10_000;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
  model:      &'a str,
  max_tokens: u32,
  thinking:   Thinking,
  system:     String,
  messages:   Vec<Message<'a>>
}

#[derive(Debug, Serialize)]
struct Thinking {
  #[serde(rename = "type")]
  kind:          &'static str,
  budget_tokens: u32
}

impl Default for Thinking {
  fn default() -> Self {
    Self { kind: "enabled", budget_tokens: THINKING_BUDGET_TOKENS }
  }
}

#[derive(Debug, Serialize)]
struct Message<'a> {
  role:    &'a str,
  content: &'a str
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
  #[serde(default)]
  content: Vec<ContentBlock>
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
  #[serde(rename = "type")]
  kind: String,
  #[serde(default)]
  text: Option<String>
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
  error: ErrorBody
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: String
}

pub async fn generate_json(http: &reqwest::Client, api_key: &str, request: &JsonRequest) -> Result<String> {
  profile!("Anthropic API call");

  let body = messages_request(request);
  let response = http
    .post(MESSAGES_URL)
    .header("x-api-key", api_key)
    .header("anthropic-version", API_VERSION)
    .json(&body)
    .send()
    .await?;

  let status = response.status();
  if !status.is_success() {
    let text = response.text().await.unwrap_or_default();
    return Err(LlmError::Api {
      provider: Provider::Anthropic,
      status:   status.as_u16(),
      message:  error_message(&text)
    });
  }

  let parsed: MessagesResponse = response.json().await?;
  Ok(collect_text(parsed))
}

fn messages_request(request: &JsonRequest) -> MessagesRequest<'_> {
  MessagesRequest {
    model:      request.model.model_id(),
    max_tokens: request.model.max_output_tokens(),
    thinking:   Thinking::default(),
    system:     request.schema_instruction(),
    messages:   vec![Message { role: "user", content: &request.prompt }]
  }
}

fn collect_text(response: MessagesResponse) -> String {
  response
    .content
    .into_iter()
    .filter(|block| block.kind == "text")
    .filter_map(|block| block.text)
    .collect::<Vec<_>>()
    .join("")
}

fn error_message(body: &str) -> String {
  serde_json::from_str::<ErrorResponse>(body)
    .map(|err| err.error.message)
    .unwrap_or_else(|_| body.trim().to_string())
}
