use std::{path::PathBuf, process::ExitCode};

use clap::{builder::ArgAction, Parser};
use console::{style, Emoji};
use paperfeed::{clients::ArxivClient, config::FeedConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

static SUCCESS: Emoji<'_, '_> = Emoji("✓ ", "");
static FAILURE: Emoji<'_, '_> = Emoji("✖ ", "");

#[derive(Parser)]
#[command(author, version, about = "Fetch the latest LLM papers in clinical research from arXiv")]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Where to write the JSON feed
  #[arg(long, short)]
  output: Option<PathBuf>,

  /// Query API endpoint
  #[arg(long)]
  endpoint: Option<String>,
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let mut config = FeedConfig::default();
  if let Some(output) = cli.output {
    config = config.with_output_path(output);
  }
  if let Some(endpoint) = cli.endpoint {
    config = config.with_endpoint(endpoint);
  }
  debug!("Running with {config:?}");

  let client = ArxivClient::new(&config.user_agent);
  match paperfeed::run(&config, &client).await {
    Ok(envelope) => {
      println!(
        "{}Successfully fetched {} papers",
        style(SUCCESS).green(),
        style(envelope.count).yellow()
      );
      println!("{}Saved to {}", style(SUCCESS).green(), style(config.output_path.display()).yellow());
      ExitCode::SUCCESS
    },
    Err(e) => {
      eprintln!("{}{e}", style(FAILURE).red());
      ExitCode::FAILURE
    },
  }
}
