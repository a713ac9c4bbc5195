//! Helpers for turning provider failures into actionable messages.

use anyhow::Error;

use crate::llm::LlmError;
use crate::model::Provider;

/// Checks if an error chain represents a provider authentication failure.
///
/// ```
/// use anyhow::anyhow;
/// use gitgen::error::is_auth_error;
///
/// let error = anyhow!("invalid_api_key: Incorrect API key provided");
/// assert!(is_auth_error(&error));
/// ```
pub fn is_auth_error(error: &Error) -> bool {
  let typed = error.chain().any(|cause| {
    matches!(
      cause.downcast_ref::<LlmError>(),
      Some(LlmError::MissingApiKey { .. }) | Some(LlmError::Api { status: 401 | 403, .. })
    )
  });

  typed || error.chain().any(|cause| is_auth_message(&cause.to_string()))
}

fn is_auth_message(message: &str) -> bool {
  let msg = message.to_lowercase();

  msg.contains("invalid_api_key") ||
  msg.contains("incorrect api key") ||
  msg.contains("invalid x-api-key") ||
  msg.contains("api key not valid") ||
  msg.contains("authentication_error") ||
  (msg.contains("unauthorized") && msg.contains("api"))
}

/// Suggestion printed below an authentication failure.
pub fn auth_hint(provider: Provider) -> String {
  format!("Check that {} holds a valid {provider} API key", provider.api_key_var())
}
