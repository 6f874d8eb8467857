//! A library for refreshing a JSON feed of recent arXiv papers.
//!
//! A run is strictly linear: build the search request, fetch the Atom feed once,
//! normalize every entry into a [`Paper`], wrap the papers in a
//! [`ResultEnvelope`] and overwrite the output file with it.
//!
//! # Example
//! ```rust,no_run
//! use paperfeed::{clients::ArxivClient, config::FeedConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let config = FeedConfig::default();
//!   let client = ArxivClient::new(&config.user_agent);
//!   let envelope = paperfeed::run(&config, &client).await?;
//!   println!("Fetched {} papers", envelope.count);
//!
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};
#[cfg(test)] use tracing_test::traced_test;
use url::Url;

pub mod clients;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod feed;
pub mod paper;
pub mod query;
pub mod sink;

use clients::FeedFetcher;
use config::FeedConfig;
use envelope::ResultEnvelope;
use errors::FeedError;
use paper::Paper;

/// Refreshes the feed once.
///
/// Fetches the configured search from `fetcher`, normalizes the entries and
/// writes the resulting envelope to `config.output_path`. The output file is
/// only touched after the fetch and the parse have both succeeded.
///
/// # Errors
///
/// Returns the [`FeedError`] of whichever stage failed first.
pub async fn run<F: FeedFetcher>(
  config: &FeedConfig,
  fetcher: &F,
) -> Result<ResultEnvelope, FeedError> {
  let url = config.request.to_url(&config.endpoint)?;
  debug!("Fetching feed via: {url}");

  let body = fetcher.fetch(&url).await?;
  debug!("Received {} bytes", body.len());

  let papers = feed::parse_feed(&body)?;
  info!("Normalized {} feed entries", papers.len());

  let envelope = ResultEnvelope::new(&config.request.search_query, papers);
  sink::write_envelope(&envelope, &config.output_path)?;
  info!("Wrote {} papers to {}", envelope.count, config.output_path.display());

  Ok(envelope)
}
