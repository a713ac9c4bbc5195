use once_cell::sync::Lazy;
use regex::Regex;

const FILE_SEPARATOR: &str = "diff --git";

static CONFIG_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(json|ya?ml)\s").expect("valid config file pattern"));

/// Removes configuration file sections (`.json`, `.yml`, `.yaml`) from a raw
/// diff so the model focuses on code changes.
///
/// The decision is made on the first line of each section, i.e. the
/// `diff --git a/<path> b/<path>` header.
pub fn filter_config_files(raw_diff: &str) -> String {
  raw_diff
    .split(FILE_SEPARATOR)
    .filter(|part| !part.trim().is_empty())
    .filter(|part| {
      let first_line = part.find('\n').map(|end| &part[..end]).unwrap_or_default();
      let keep = !CONFIG_FILE.is_match(first_line);
      if !keep {
        log::debug!("Filtering config file from diff:{first_line}");
      }
      keep
    })
    .map(|part| format!("{FILE_SEPARATOR}{part}"))
    .collect()
}
