use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use gitgen::cli::{Cli, Command};
use gitgen::commands;
use gitgen::error::{auth_hint, is_auth_error};
use gitgen::llm::LlmError;
use log::{debug, Level, LevelFilter};

fn init_logging(verbose: bool) {
  let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

  env_logger::builder()
    .filter_level(level)
    .parse_default_env()
    .format(|buf, record| match record.level() {
      Level::Error => writeln!(buf, "{} {}", "ERROR:".bold().bright_red(), record.args()),
      Level::Warn => writeln!(buf, "{} {}", "WARN:".bold().yellow(), record.args()),
      _ => writeln!(buf, "{}", record.args())
    })
    .init();

  debug!("Verbose logging enabled");
}

async fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Command::Commit(args) => commands::commit::run(args).await,
    Command::Gh(args) => commands::gh::run(args).await,
    Command::Changelog(args) => commands::changelog::run(args).await,
    Command::Rules(args) => commands::rules::run(args)
  }
}

fn report(err: &anyhow::Error) {
  eprintln!("{} {}", "ERROR:".bold().bright_red(), err);
  for cause in err.chain().skip(1) {
    eprintln!("    {}", cause.to_string().dimmed());
  }

  if is_auth_error(err) {
    let provider = err.chain().find_map(|cause| match cause.downcast_ref::<LlmError>() {
      Some(LlmError::MissingApiKey { provider, .. }) | Some(LlmError::Api { provider, .. }) => Some(*provider),
      _ => None
    });

    if let Some(provider) = provider {
      eprintln!("\n{}", auth_hint(provider).yellow());
    }
  }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
  dotenv().ok();

  let cli = Cli::parse();
  init_logging(cli.verbose);

  match run(cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      report(&err);
      ExitCode::FAILURE
    }
  }
}
