mod common;

use common::{MockModel, DIFF};
use gitgen::generation::Generator;
use gitgen::git::GitCommit;
use gitgen::model::ModelFamily;

fn generator(model: &MockModel) -> Generator<MockModel> {
  Generator::new(model.clone(), ModelFamily::Sonnet45)
}

#[tokio::test]
async fn test_commit_message_prompt_uses_transformed_diff() {
  let model = MockModel::new().respond("CommitMessage", r#"{"message":"fix(helper): return new value\n"}"#);

  let message = generator(&model).generate_commit_message(DIFF).await.unwrap();
  assert_eq!(message, "fix(helper): return new value");

  let requests = model.requests();
  assert_eq!(requests.len(), 1);
  assert_eq!(requests[0].model, ModelFamily::Sonnet45);
  assert_eq!(requests[0].schema_name, "CommitMessage");

  let prompt = &requests[0].prompt;
  assert!(prompt.contains("=== FILE: src/helper.ts (modified) ==="));
  assert!(prompt.contains("--- REMOVED (line 11) ---"));
  assert!(!prompt.contains("package.json"));
  assert!(!prompt.contains("User-Provided Context"));
}

#[tokio::test]
async fn test_context_reaches_the_prompt() {
  let model = MockModel::new().respond("PrTitle", r#"{"title":"fix(helper): return new value"}"#);
  let generator = generator(&model).with_context(Some("Part of the helper cleanup".into()));

  generator.generate_title(DIFF).await.unwrap();

  assert!(model.last_prompt().contains("> Part of the helper cleanup"));
}

#[tokio::test]
async fn test_pr_details_are_rendered() {
  let model = MockModel::new().respond(
    "PrDetails",
    r#"```json
{"title":"fix(helper): return new value","description":"Returns the new value.","fileSummaries":[{"file":"src/helper.ts","description":"Changes the return value"}]}
```"#
  );

  let content = generator(&model).generate_pr_details(DIFF).await.unwrap();

  assert_eq!(content.title, "fix(helper): return new value");
  assert!(content.body.starts_with("Returns the new value.\n\n<details>"));
  assert!(content.body.contains("| src/helper.ts | Changes the return value |"));
}

#[tokio::test]
async fn test_review_is_tagged_with_username() {
  let model = MockModel::new().respond(
    "PrReviewDetails",
    r#"{"review":[{"file":"src/helper.ts","line":11,"category":"Bug","comment":"Check callers","codeSnippet":"return \"new\";"}]}"#
  );

  let review = generator(&model).generate_review(DIFF, "jane").await.unwrap();

  assert!(review.starts_with("<!-- [gitai-review:jane](https://github.com/lucas-barake/gitai) -->"));
  assert!(review.contains("**src/helper.ts:11**\n* [Bug] Check callers"));
}

#[tokio::test]
async fn test_changelog_prompt_lists_commits() {
  let model = MockModel::new().respond("Changelog", r##"{"changelog":"# CLI Commands\n> Changelogs\n"}"##);
  let commits = vec![GitCommit { short_hash: "a1b2c3d".into(), subject: "feat(cli): add changelog command".into(), ..Default::default() }];

  let changelog = generator(&model).generate_changelog(&commits).await.unwrap();

  assert_eq!(changelog, "# CLI Commands\n> Changelogs");
  assert!(model.last_prompt().contains("**Commit a1b2c3d**"));
}

#[tokio::test]
async fn test_model_failure_names_the_task() {
  let model = MockModel::new();

  let err = generator(&model).generate_commit_message(DIFF).await.unwrap_err();
  assert_eq!(err.to_string(), "Failed to generate commit message");
  assert!(format!("{err:#}").contains("no canned response for CommitMessage"));
}

#[tokio::test]
async fn test_invalid_json_is_an_error() {
  let model = MockModel::new().respond("PrTitle", "Sure! Here is a title: feat: x");

  let err = generator(&model).generate_title(DIFF).await.unwrap_err();
  assert!(format!("{err:#}").contains("Model response is not a valid PrTitle"));
}
