pub mod format;
pub mod generator;
pub mod prompts;
pub mod types;

pub use format::{format_pr_description, format_review_as_markdown, review_comment_tag};
pub use generator::{prepare_diff, Generator, PrContent};
pub use prompts::format_commits_for_prompt;
pub use types::{Changelog, CommitMessage, FileSummary, PrDetails, PrReviewDetails, PrTitle, ReviewItem};
