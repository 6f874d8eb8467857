//! Error types for the paperfeed library.
//!
//! Only three things can end a run early: the feed could not be fetched, the
//! fetched payload was not well-formed XML, or the result could not be written.
//! Missing fields inside an entry are never errors; they become empty values
//! during normalization.
//!
//! # Examples
//!
//! ```no_run
//! use paperfeed::{clients::ArxivClient, config::FeedConfig, errors::FeedError};
//!
//! # async fn example() {
//! let config = FeedConfig::default();
//! let client = ArxivClient::new(&config.user_agent);
//! match paperfeed::run(&config, &client).await {
//!   Ok(envelope) => println!("{} papers", envelope.count),
//!   Err(FeedError::FetchFailed(e)) => eprintln!("arXiv unreachable: {e}"),
//!   Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```

use thiserror::Error;

/// Errors that abort a feed refresh.
///
/// Each variant is raised by exactly one pipeline stage, so its display text
/// doubles as the diagnostic line printed by the command line tool.
#[derive(Error, Debug)]
pub enum FeedError {
  /// The request to the feed endpoint failed.
  ///
  /// Covers DNS and connection errors as well as non-success HTTP statuses.
  #[error("Error fetching arXiv data: {0}")]
  FetchFailed(#[from] reqwest::Error),

  /// The response body is not a well-formed XML document.
  ///
  /// No partial results are kept when this happens.
  #[error("Error parsing XML: {0}")]
  ParseFailed(String),

  /// The output file or its parent directory could not be written.
  #[error("Error writing to file: {0}")]
  WriteFailed(#[from] std::io::Error),

  /// The envelope could not be encoded as JSON.
  #[error("Error encoding JSON: {0}")]
  Serialization(#[from] serde_json::Error),

  /// The configured endpoint is not a valid URL.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),
}

impl FeedError {
  /// Builds a [`FeedError::ParseFailed`] from any displayable parser error.
  pub(crate) fn malformed(reason: impl std::fmt::Display) -> Self {
    FeedError::ParseFailed(reason.to_string())
  }
}
