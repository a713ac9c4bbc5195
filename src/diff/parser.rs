//! Git diff parsing utilities.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{ChangeKind, DiffChange, DiffHunk, FileStatus, ParsedFileDiff};

const FILE_SEPARATOR: &str = "diff --git ";
const BINARY_MARKER: &str = "Binary files";
const DEV_NULL: &str = "/dev/null";
const PREVIEW_BYTES: usize = 500;

// Only genuine file boundaries: the marker must start a line
static FILE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^diff --git ").expect("valid file boundary pattern"));

static HUNK_HEADER: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("valid hunk header pattern"));

/// Parse a unified diff into per-file hunk data.
///
/// Handles the output of `git diff` and `gh pr diff`, including:
/// - Multiple files, kept in diff order
/// - Added, deleted and renamed files (`/dev/null` headers, differing paths)
/// - Hunk headers with omitted line counts
///
/// Parsing is best effort and never fails: binary sections and sections
/// without a resolvable path are skipped, unknown hunk lines are ignored.
///
/// # Arguments
/// * `raw_diff` - Raw diff text
///
/// # Returns
/// * `Vec<ParsedFileDiff>` - One entry per parseable file section
pub fn parse_diff(raw_diff: &str) -> Vec<ParsedFileDiff> {
  if raw_diff.trim().is_empty() {
    return Vec::new();
  }

  log::debug!("Parsing diff with {} lines", raw_diff.lines().count());

  if log::log_enabled!(log::Level::Debug) {
    log::debug!("Diff content preview: \n{}", preview(raw_diff, PREVIEW_BYTES));
  }

  let files: Vec<ParsedFileDiff> = FILE_BOUNDARY
    .split(raw_diff)
    .filter(|chunk| !chunk.trim().is_empty())
    .filter_map(|chunk| parse_file_diff(&format!("{FILE_SEPARATOR}{chunk}")))
    .collect();

  log::debug!("Parsed {} files from diff", files.len());

  files
}

fn parse_file_diff(chunk: &str) -> Option<ParsedFileDiff> {
  if chunk.contains(BINARY_MARKER) {
    log::debug!("Skipping binary section: {}", chunk.lines().next().unwrap_or_default());
    return None;
  }

  let lines: Vec<&str> = chunk.split('\n').collect();
  let (old_path, new_path) = parse_file_paths(&lines);

  let status = FileStatus::from_paths(old_path.as_deref(), new_path.as_deref());
  let file_path = match (new_path, &old_path) {
    (Some(new), _) => new,
    (None, Some(old)) => old.clone(),
    (None, None) => {
      log::debug!("Skipping section without file headers: {}", chunk.lines().next().unwrap_or_default());
      return None;
    }
  };

  log::debug!("Found file in diff: {file_path} ({status})");

  Some(ParsedFileDiff {
    file_path,
    old_path: old_path.filter(|_| status == FileStatus::Renamed),
    status,
    hunks: parse_hunks(&lines)
  })
}

/// Reads the `---`/`+++` header pair, stopping once both have been seen.
fn parse_file_paths(lines: &[&str]) -> (Option<String>, Option<String>) {
  let mut old_path: Option<Option<String>> = None;
  let mut new_path: Option<Option<String>> = None;

  for line in lines {
    if let Some(path) = line.strip_prefix("--- ") {
      old_path = Some(decode_path(path, "a/"));
    } else if let Some(path) = line.strip_prefix("+++ ") {
      new_path = Some(decode_path(path, "b/"));
    }

    if old_path.is_some() && new_path.is_some() {
      break;
    }
  }

  (old_path.flatten(), new_path.flatten())
}

fn decode_path(raw: &str, prefix: &str) -> Option<String> {
  let path = raw.trim();
  if path == DEV_NULL {
    return None;
  }
  Some(path.strip_prefix(prefix).unwrap_or(path).to_string())
}

fn parse_hunk_header(line: &str) -> Option<DiffHunk> {
  let captures = HUNK_HEADER.captures(line)?;
  let number = |index: usize, default: u64| -> u64 {
    captures
      .get(index)
      .map_or(default, |m| parse_saturating(m.as_str()))
  };

  Some(DiffHunk {
    old_start: number(1, 0),
    old_lines: number(2, 1),
    new_start: number(3, 0),
    new_lines: number(4, 1),
    changes:   Vec::new()
  })
}

// Digits only, so the sole failure is overflow
fn parse_saturating(digits: &str) -> u64 {
  digits.parse().unwrap_or(u64::MAX)
}

/// A hunk whose body is still being read, with the next old/new line numbers.
#[derive(Debug)]
struct OpenHunk {
  hunk:     DiffHunk,
  old_line: u64,
  new_line: u64
}

impl OpenHunk {
  fn new(hunk: DiffHunk) -> Self {
    Self { old_line: hunk.old_start, new_line: hunk.new_start, hunk }
  }

  fn push_line(mut self, line: &str) -> Self {
    let change = if let Some(content) = line.strip_prefix('+') {
      let change = DiffChange::new(ChangeKind::Add, content, self.new_line);
      self.new_line = self.new_line.saturating_add(1);
      change
    } else if let Some(content) = line.strip_prefix('-') {
      let change = DiffChange::new(ChangeKind::Remove, content, self.old_line);
      self.old_line = self.old_line.saturating_add(1);
      change
    } else if line.is_empty() || line.starts_with(' ') {
      // Blank lines count as context even without the leading space
      let content = line.strip_prefix(' ').unwrap_or(line);
      let change = DiffChange::new(ChangeKind::Context, content, self.new_line);
      self.old_line = self.old_line.saturating_add(1);
      self.new_line = self.new_line.saturating_add(1);
      change
    } else {
      return self;
    };

    self.hunk.changes.push(change);
    self
  }
}

#[derive(Debug)]
enum HunkState {
  BeforeFirstHunk,
  InHunk(OpenHunk)
}

#[derive(Debug)]
struct HunkAccumulator {
  hunks: Vec<DiffHunk>,
  state: HunkState
}

impl HunkAccumulator {
  fn new() -> Self {
    Self { hunks: Vec::new(), state: HunkState::BeforeFirstHunk }
  }

  fn step(self, line: &str) -> Self {
    let Self { mut hunks, state } = self;

    if let Some(header) = parse_hunk_header(line) {
      if let HunkState::InHunk(open) = state {
        hunks.push(open.hunk);
      }
      return Self { hunks, state: HunkState::InHunk(OpenHunk::new(header)) };
    }

    let state = match state {
      HunkState::BeforeFirstHunk => HunkState::BeforeFirstHunk,
      HunkState::InHunk(open) => HunkState::InHunk(open.push_line(line))
    };

    Self { hunks, state }
  }

  fn finish(self) -> Vec<DiffHunk> {
    let Self { mut hunks, state } = self;
    if let HunkState::InHunk(open) = state {
      hunks.push(open.hunk);
    }
    hunks
  }
}

fn parse_hunks(lines: &[&str]) -> Vec<DiffHunk> {
  lines
    .iter()
    .fold(HunkAccumulator::new(), |acc, line| acc.step(line))
    .finish()
}

// Truncates at a valid UTF-8 character boundary
fn preview(content: &str, max_bytes: usize) -> String {
  if content.len() <= max_bytes {
    return content.to_string();
  }

  let truncated_index = content
    .char_indices()
    .take_while(|(i, _)| *i < max_bytes)
    .last()
    .map(|(i, c)| i + c.len_utf8())
    .unwrap_or(0);

  format!("{}... (truncated)", &content[..truncated_index])
}
