//! Markdown rendering of generated PR content.

use super::types::{PrDetails, PrReviewDetails, ReviewItem};

const PROJECT_URL: &str = "https://github.com/lucas-barake/gitai";

/// Hidden marker identifying review comments posted by `username`.
pub fn review_comment_tag(username: &str) -> String {
  format!("<!-- [gitai-review:{username}]({PROJECT_URL}) -->")
}

/// The PR body: description followed by a collapsible per-file summary table.
pub fn format_pr_description(details: &PrDetails) -> String {
  let rows = details
    .file_summaries
    .iter()
    .map(|summary| format!("| {} | {} |", summary.file, summary.description))
    .collect::<Vec<_>>()
    .join("\n");

  format!(
    "{}\n\n<details>\n<summary>Show a summary per file</summary>\n\n| File | Description |\n| ---- | ----------- |\n{rows}\n</details>",
    details.description
  )
}

fn format_review_item(item: &ReviewItem) -> String {
  format!(
    "**{}:{}**\n* [{}] {}\n```\n{}\n```",
    item.file, item.line, item.category, item.comment, item.code_snippet
  )
}

pub fn format_review_as_markdown(review: &PrReviewDetails, username: &str) -> String {
  let items = review
    .review
    .iter()
    .map(format_review_item)
    .collect::<Vec<_>>()
    .join("\n\n");

  format!(
    "{}\n<details>\n<summary>Review</summary>\n\n{items}\n</details>",
    review_comment_tag(username)
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generation::types::FileSummary;

  #[test]
  fn test_review_comment_tag() {
    assert_eq!(review_comment_tag("testuser"), "<!-- [gitai-review:testuser](https://github.com/lucas-barake/gitai) -->");
    assert!(review_comment_tag("user-with-dashes").contains("gitai-review:user-with-dashes"));
  }

  #[test]
  fn test_format_pr_description() {
    let details = PrDetails {
      title:          "Test PR".into(),
      description:    "This is the PR description.".into(),
      file_summaries: vec![
        FileSummary { file: "src/a.rs".into(), description: "Changed module A".into() },
        FileSummary { file: "src/b.rs".into(), description: "Added module B".into() },
      ]
    };

    assert_eq!(
      format_pr_description(&details),
      "This is the PR description.

<details>
<summary>Show a summary per file</summary>

| File | Description |
| ---- | ----------- |
| src/a.rs | Changed module A |
| src/b.rs | Added module B |
</details>"
    );
  }

  #[test]
  fn test_format_pr_description_without_files() {
    let details = PrDetails { title: "T".into(), description: "Description".into(), file_summaries: vec![] };
    let body = format_pr_description(&details);
    assert!(body.starts_with("Description\n\n<details>"));
  }

  #[test]
  fn test_format_review_as_markdown() {
    let review = PrReviewDetails {
      review: vec![
        ReviewItem {
          file:         "src/index.rs".into(),
          line:         10,
          category:     "Bug".into(),
          comment:      "Potential panic".into(),
          code_snippet: "let x = v[0];".into()
        },
        ReviewItem {
          file:         "b.rs".into(),
          line:         2,
          category:     "Performance".into(),
          comment:      "Clones in a loop".into(),
          code_snippet: "s.clone()".into()
        },
      ]
    };

    let markdown = format_review_as_markdown(&review, "testuser");
    assert!(markdown.starts_with("<!-- [gitai-review:testuser]"));
    assert!(markdown.contains("<summary>Review</summary>"));
    assert!(markdown.contains("**src/index.rs:10**\n* [Bug] Potential panic\n```\nlet x = v[0];\n```\n\n**b.rs:2**"));
    assert!(markdown.ends_with("```\n</details>"));
  }

  #[test]
  fn test_format_empty_review() {
    let markdown = format_review_as_markdown(&PrReviewDetails { review: vec![] }, "user");
    assert!(markdown.contains("<!-- [gitai-review:user]"));
    assert!(markdown.contains("<details>"));
  }
}
