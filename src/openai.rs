use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat};
use async_openai::Client;

use crate::llm::{JsonRequest, LlmError, Result};
use crate::model::Provider;
use crate::profile;

/// Sends a chat completion in JSON mode. The schema travels in the system message.
pub async fn generate_json(api_key: &str, request: &JsonRequest) -> Result<String> {
  profile!("OpenAI API call");

  let config = OpenAIConfig::new().with_api_key(api_key);
  let client = Client::with_config(config);

  let completion = CreateChatCompletionRequestArgs::default()
    .model(request.model.model_id())
    .response_format(ResponseFormat::JsonObject)
    .messages([
      ChatCompletionRequestSystemMessageArgs::default()
        .content(request.schema_instruction())
        .build()?
        .into(),
      ChatCompletionRequestUserMessageArgs::default()
        .content(request.prompt.clone())
        .build()?
        .into()
    ])
    .build()?;

  let response = client.chat().create(completion).await.map_err(|err| match err {
    OpenAIError::ApiError(api) =>
      LlmError::Api {
        provider: Provider::OpenAi,
        status:   0,
        message:  api.message
      },
    other => LlmError::OpenAi(other)
  })?;

  response
    .choices
    .into_iter()
    .next()
    .and_then(|choice| choice.message.content)
    .ok_or(LlmError::EmptyResponse(Provider::OpenAi))
}
