use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::llm::ResponseSchema;

fn string_field(description: &str) -> Value {
  json!({ "type": "string", "description": description })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
  pub message: String
}

impl ResponseSchema for CommitMessage {
  const NAME: &'static str = "CommitMessage";

  fn schema() -> Value {
    json!({
      "type": "object",
      "properties": { "message": string_field("The commit message") },
      "required": ["message"]
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrTitle {
  pub title: String
}

impl ResponseSchema for PrTitle {
  const NAME: &'static str = "PrTitle";

  fn schema() -> Value {
    json!({
      "type": "object",
      "properties": { "title": string_field("The PR title") },
      "required": ["title"]
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
  pub file:        String,
  pub description: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrDetails {
  pub title:          String,
  pub description:    String,
  #[serde(default)]
  pub file_summaries: Vec<FileSummary>
}

impl ResponseSchema for PrDetails {
  const NAME: &'static str = "PrDetails";

  fn schema() -> Value {
    json!({
      "type": "object",
      "properties": {
        "title": string_field("The PR title"),
        "description": string_field("The PR description"),
        "fileSummaries": {
          "type": "array",
          "items": {
            "type": "object",
            "properties": {
              "file": string_field("The file path"),
              "description": string_field("A one-sentence summary of the changes in the file")
            },
            "required": ["file", "description"]
          }
        }
      },
      "required": ["title", "description", "fileSummaries"]
    })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
  pub file:         String,
  pub line:         u32,
  pub category:     String,
  pub comment:      String,
  pub code_snippet: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrReviewDetails {
  #[serde(default)]
  pub review: Vec<ReviewItem>
}

impl ResponseSchema for PrReviewDetails {
  const NAME: &'static str = "PrReviewDetails";

  fn schema() -> Value {
    json!({
      "type": "object",
      "properties": {
        "review": {
          "type": "array",
          "items": {
            "type": "object",
            "properties": {
              "file": string_field("The file path for the comment"),
              "line": { "type": "integer", "description": "The line number for the comment" },
              "category": string_field("The category of the feedback (e.g., 'Security', 'Bug', 'Optimization', 'Improvement')"),
              "comment": string_field("The review comment"),
              "codeSnippet": string_field("The relevant code snippet")
            },
            "required": ["file", "line", "category", "comment", "codeSnippet"]
          }
        }
      },
      "required": ["review"]
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
  pub changelog: String
}

impl ResponseSchema for Changelog {
  const NAME: &'static str = "Changelog";

  fn schema() -> Value {
    json!({
      "type": "object",
      "properties": { "changelog": string_field("The changelog in markdown format") },
      "required": ["changelog"]
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decode_pr_details_camel_case() {
    let details: PrDetails = serde_json::from_str(
      r#"{"title":"feat: x","description":"Body","fileSummaries":[{"file":"a.rs","description":"Adds a"}]}"#
    )
    .unwrap();
    assert_eq!(details.file_summaries, vec![FileSummary { file: "a.rs".into(), description: "Adds a".into() }]);
  }

  #[test]
  fn test_decode_review_item() {
    let review: PrReviewDetails = serde_json::from_str(
      r#"{"review":[{"file":"a.rs","line":4,"category":"Bug","comment":"Off by one","codeSnippet":"i <= n"}]}"#
    )
    .unwrap();
    assert_eq!(review.review[0].code_snippet, "i <= n");
    assert_eq!(review.review[0].line, 4);
  }

  #[test]
  fn test_schemas_require_their_fields() {
    assert_eq!(PrDetails::schema()["required"], json!(["title", "description", "fileSummaries"]));
    assert_eq!(CommitMessage::schema()["properties"]["message"]["type"], "string");
    assert_eq!(PrReviewDetails::schema()["properties"]["review"]["items"]["properties"]["line"]["type"], "integer");
  }
}
