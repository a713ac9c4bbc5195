use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm::{JsonRequest, LlmError, Result};
use crate::model::Provider;
use crate::profile;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
  contents:          Vec<Content<'a>>,
  generation_config: GenerationConfig<'a>
}

#[derive(Debug, Serialize)]
struct Content<'a> {
  role:  &'a str,
  parts: Vec<Part<'a>>
}

#[derive(Debug, Serialize)]
struct Part<'a> {
  text: &'a str
}

#[derive(Debug, Serialize)]
struct GenerationConfig<'a> {
  response_mime_type: &'a str,
  response_schema:    &'a Value
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<CandidateContent>
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
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

/// Calls `generateContent` with the schema enforced through `generationConfig`.
pub async fn generate_json(http: &reqwest::Client, api_key: &str, request: &JsonRequest) -> Result<String> {
  profile!("Google API call");

  let url = format!("{API_BASE}/{}:generateContent", request.model.model_id());
  let body = GenerateRequest {
    contents:          vec![Content { role: "user", parts: vec![Part { text: &request.prompt }] }],
    generation_config: GenerationConfig {
      response_mime_type: "application/json",
      response_schema:    &request.schema
    }
  };

  let response = http
    .post(url)
    .header("x-goog-api-key", api_key)
    .json(&body)
    .send()
    .await?;

  let status = response.status();
  if !status.is_success() {
    let text = response.text().await.unwrap_or_default();
    return Err(LlmError::Api {
      provider: Provider::Google,
      status:   status.as_u16(),
      message:  serde_json::from_str::<ErrorResponse>(&text)
        .map(|err| err.error.message)
        .unwrap_or_else(|_| text.trim().to_string())
    });
  }

  let parsed: GenerateResponse = response.json().await?;
  Ok(first_candidate_text(parsed))
}

fn first_candidate_text(response: GenerateResponse) -> String {
  response
    .candidates
    .into_iter()
    .next()
    .and_then(|candidate| candidate.content)
    .map(|content| {
      content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("")
    })
    .unwrap_or_default()
}
