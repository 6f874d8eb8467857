//! Clients that retrieve the raw Atom feed.
//!
//! The pipeline only needs the response body of a single request, so the
//! boundary is the [`FeedFetcher`] trait. [`ArxivClient`] performs the real
//! HTTP request; tests substitute an in-memory feed.
//!
//! # Examples
//!
//! ```no_run
//! use paperfeed::{
//!   clients::{ArxivClient, FeedFetcher},
//!   query::FeedRequest,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let url = FeedRequest::default().to_url("http://export.arxiv.org/api/query")?;
//! let body = ArxivClient::new("Mozilla/5.0").fetch(&url).await?;
//! println!("{} bytes", body.len());
//! # Ok(())
//! # }
//! ```

use std::future::Future;

pub mod arxiv;

pub use arxiv::ArxivClient;

use super::*;

/// Source of the raw feed payload.
pub trait FeedFetcher {
  /// Performs one request against `url` and returns the response body.
  ///
  /// Transport failures and non-success statuses are reported as
  /// [`FeedError::FetchFailed`].
  fn fetch(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>, FeedError>>;
}
