//! Client implementation for the arXiv query API.
//!
//! The API lives at http://export.arxiv.org/api/query and answers with an Atom
//! feed. It refuses requests that do not carry a browser-like `User-Agent`, so
//! the client sends one with every request.

use reqwest::header::USER_AGENT;

use super::*;

/// Client for the arXiv query API.
///
/// # Examples
///
/// ```no_run
/// # use paperfeed::{clients::{ArxivClient, FeedFetcher}, query::FeedRequest};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ArxivClient::new("Mozilla/5.0");
/// let url = FeedRequest::default().to_url("http://export.arxiv.org/api/query")?;
/// let body = client.fetch(&url).await?;
/// # Ok(())
/// # }
/// ```
pub struct ArxivClient {
  /// Internal web client used to connect to the API.
  client:     reqwest::Client,
  /// Value of the `User-Agent` header.
  user_agent: String,
}

impl ArxivClient {
  /// Creates a new arXiv client that identifies itself as `user_agent`.
  pub fn new(user_agent: &str) -> Self {
    Self { client: reqwest::Client::new(), user_agent: user_agent.to_owned() }
  }
}

impl Default for ArxivClient {
  fn default() -> Self { Self::new(config::DEFAULT_USER_AGENT) }
}

impl FeedFetcher for ArxivClient {
  async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FeedError> {
    debug!("Requesting {url}");

    let response = self
      .client
      .get(url.clone())
      .header(USER_AGENT, &self.user_agent)
      .send()
      .await?
      .error_for_status()?;

    let body = response.bytes().await?;
    trace!("arXiv response: {}", String::from_utf8_lossy(&body));

    Ok(body.to_vec())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_unreachable_endpoint_is_fetch_failure() {
    let client = ArxivClient::default();
    let url = Url::parse("http://127.0.0.1:9/api/query").unwrap();
    let result = client.fetch(&url).await;
    assert!(matches!(result, Err(FeedError::FetchFailed(_))));
  }

  #[ignore = "requires network access to export.arxiv.org"]
  #[traced_test]
  #[tokio::test]
  async fn test_arxiv_feed_fetch() -> anyhow::Result<()> {
    let config = FeedConfig::default();
    let url = config.request.to_url(&config.endpoint)?;
    let body = ArxivClient::new(&config.user_agent).fetch(&url).await?;

    let papers = feed::parse_feed(&body)?;
    assert!(papers.len() <= config.request.max_results);
    for paper in &papers {
      assert!(paper.arxiv_url.contains("/abs/"));
      assert!(!paper.pdf_url.is_empty());
    }
    Ok(())
  }
}
