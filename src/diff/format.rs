//! Renders parsed diffs into an explicit, marker-based text layout.
//!
//! ```text
//! === FILE: src/helper.ts (modified) ===
//!
//! ~~~ CONTEXT (line 10) ~~~
//! export function helper() {
//!
//! --- REMOVED (line 11) ---
//!   return "old";
//!
//! +++ ADDED (line 11) +++
//!   return "new";
//!
//! === END FILE ===
//! ```

use super::types::{ChangeKind, DiffChange, DiffHunk, FileStatus, ParsedFileDiff};

const FILE_FOOTER: &str = "=== END FILE ===";
const BLOCK_SEPARATOR: &str = "\n\n";

/// Formats parsed diff data into the LLM-facing representation.
///
/// Returns an empty string when there is nothing to render.
pub fn format_diff_for_llm(diffs: &[ParsedFileDiff]) -> String {
  diffs
    .iter()
    .map(format_file_diff)
    .collect::<Vec<_>>()
    .join(BLOCK_SEPARATOR)
}

fn format_file_diff(diff: &ParsedFileDiff) -> String {
  let header = format!("=== FILE: {} ({}) ===", diff.file_path, status_label(diff));
  let hunks = diff
    .hunks
    .iter()
    .map(format_hunk)
    .collect::<Vec<_>>()
    .join(BLOCK_SEPARATOR);

  format!("{header}{BLOCK_SEPARATOR}{hunks}{BLOCK_SEPARATOR}{FILE_FOOTER}")
}

fn status_label(diff: &ParsedFileDiff) -> String {
  match (diff.status, diff.old_path.as_deref()) {
    (FileStatus::Renamed, Some(old_path)) => format!("renamed from {old_path}"),
    (status, _) => status.to_string()
  }
}

/// A maximal run of consecutive changes of the same kind.
#[derive(Debug)]
struct ChangeGroup<'a> {
  kind:    ChangeKind,
  changes: Vec<&'a DiffChange>
}

fn group_consecutive_changes(changes: &[DiffChange]) -> Vec<ChangeGroup<'_>> {
  let mut groups: Vec<ChangeGroup<'_>> = Vec::new();

  for change in changes {
    match groups.last_mut() {
      Some(group) if group.kind == change.kind => group.changes.push(change),
      _ => groups.push(ChangeGroup { kind: change.kind, changes: vec![change] })
    }
  }

  groups
}

fn line_range(changes: &[&DiffChange]) -> String {
  match (changes.first(), changes.last()) {
    (Some(first), Some(last)) if first.line_number == last.line_number => format!("line {}", first.line_number),
    (Some(first), Some(last)) => format!("lines {}-{}", first.line_number, last.line_number),
    _ => String::new()
  }
}

fn format_group(group: &ChangeGroup<'_>) -> String {
  let range = line_range(&group.changes);
  let content = group
    .changes
    .iter()
    .map(|change| change.content.as_str())
    .collect::<Vec<_>>()
    .join("\n");

  match group.kind {
    ChangeKind::Remove => format!("--- REMOVED ({range}) ---\n{content}"),
    ChangeKind::Add => format!("+++ ADDED ({range}) +++\n{content}"),
    ChangeKind::Context => format!("~~~ CONTEXT ({range}) ~~~\n{content}")
  }
}

fn format_hunk(hunk: &DiffHunk) -> String {
  group_consecutive_changes(&hunk.changes)
    .iter()
    .map(format_group)
    .collect::<Vec<_>>()
    .join(BLOCK_SEPARATOR)
}
