pub mod profiling;
pub mod process;

pub mod anthropic;
pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod generation;
pub mod git;
pub mod github;
pub mod google;
pub mod llm;
pub mod model;
pub mod openai;
pub mod preferences;
pub mod style;

// Re-exports
pub use diff::{format_diff_for_llm, parse_diff, transform_diff_for_llm};
pub use profiling::Profile;
