use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The role of a single line inside a hunk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
  Add,
  Remove,
  Context
}

impl ChangeKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ChangeKind::Add => "add",
      ChangeKind::Remove => "remove",
      ChangeKind::Context => "context"
    }
  }
}

/// One line of a hunk with its marker stripped.
///
/// `line_number` refers to the new file for additions and context lines and to
/// the old file for removals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiffChange {
  pub kind:        ChangeKind,
  pub content:     String,
  pub line_number: u64
}

impl DiffChange {
  pub fn new(kind: ChangeKind, content: impl Into<String>, line_number: u64) -> Self {
    Self { kind, content: content.into(), line_number }
  }
}

/// One `@@ -a,b +c,d @@` block and the lines that follow it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiffHunk {
  pub old_start: u64,
  pub old_lines: u64,
  pub new_start: u64,
  pub new_lines: u64,
  pub changes:   Vec<DiffChange>
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
  Added,
  Modified,
  Deleted,
  Renamed
}

impl FileStatus {
  /// Classifies a file from the paths found in its `---`/`+++` headers.
  pub fn from_paths(old_path: Option<&str>, new_path: Option<&str>) -> Self {
    match (old_path, new_path) {
      (None, Some(_)) => FileStatus::Added,
      (Some(_), None) => FileStatus::Deleted,
      (Some(old), Some(new)) if old != new => FileStatus::Renamed,
      _ => FileStatus::Modified
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      FileStatus::Added => "added",
      FileStatus::Modified => "modified",
      FileStatus::Deleted => "deleted",
      FileStatus::Renamed => "renamed"
    }
  }
}

impl Display for FileStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A single file section of a diff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFileDiff {
  /// Post-change path, or the old path for deletions
  pub file_path: String,
  /// Only set for renames
  pub old_path:  Option<String>,
  pub status:    FileStatus,
  pub hunks:     Vec<DiffHunk>
}
