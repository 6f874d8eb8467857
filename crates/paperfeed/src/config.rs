//! Run configuration for a feed refresh.
//!
//! Everything the pipeline needs to know about its environment is carried here
//! explicitly instead of being derived from where the program is installed.

use super::*;

/// Query API endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://export.arxiv.org/api/query";

/// The API rejects requests without a browser-like user agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Output location, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "assets/arxiv.json";

/// Configuration for one refresh of the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
  /// Base URL of the query API
  pub endpoint:    String,
  /// Value sent in the `User-Agent` header
  pub user_agent:  String,
  /// File that receives the JSON envelope, overwritten on every run
  pub output_path: PathBuf,
  /// Search parameters
  pub request:     query::FeedRequest,
}

impl Default for FeedConfig {
  fn default() -> Self {
    Self {
      endpoint:    DEFAULT_ENDPOINT.to_owned(),
      user_agent:  DEFAULT_USER_AGENT.to_owned(),
      output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
      request:     query::FeedRequest::default(),
    }
  }
}

impl FeedConfig {
  /// Replaces the output path.
  pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.output_path = path.into();
    self
  }

  /// Replaces the query API endpoint.
  pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
    self.endpoint = endpoint.into();
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config() {
    let config = FeedConfig::default();
    assert_eq!(config.endpoint, "http://export.arxiv.org/api/query");
    assert_eq!(config.user_agent, "Mozilla/5.0");
    assert_eq!(config.output_path, Path::new("assets").join("arxiv.json"));
    assert_eq!(config.request, query::FeedRequest::default());
  }

  #[test]
  fn test_config_overrides() {
    let config =
      FeedConfig::default().with_output_path("/tmp/feed.json").with_endpoint("http://localhost/q");
    assert_eq!(config.output_path, PathBuf::from("/tmp/feed.json"));
    assert_eq!(config.endpoint, "http://localhost/q");
  }
}
