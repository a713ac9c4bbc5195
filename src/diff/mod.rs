//! Diff processing and rendering utilities.
//!
//! This module turns raw unified diffs (from `git diff` or `gh pr diff`) into
//! structured per-file hunks and renders them into a plain-text layout that
//! language models read more reliably than `+`/`-` prefixed lines.

pub mod filter;
pub mod format;
pub mod parser;
pub mod types;

pub use filter::filter_config_files;
pub use format::format_diff_for_llm;
pub use parser::parse_diff;
pub use types::{ChangeKind, DiffChange, DiffHunk, FileStatus, ParsedFileDiff};

/// Parses and formats a diff in one step.
pub fn transform_diff_for_llm(raw_diff: &str) -> String {
  format_diff_for_llm(&parse_diff(raw_diff))
}
