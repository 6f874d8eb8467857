//! Search request construction for the arXiv query API.
//!
//! The search looks for LLM-related work in medical and statistical fields:
//! any of the topic terms combined with any of the domain terms. Results are
//! requested newest-first by submission date.
//!
//! # Examples
//!
//! ```
//! use paperfeed::query::FeedRequest;
//!
//! let request = FeedRequest::default();
//! let url = request.to_url("http://export.arxiv.org/api/query").unwrap();
//! assert!(url.as_str().contains("max_results=15"));
//! assert!(url.as_str().contains("sortBy=submittedDate"));
//! ```

use super::*;

/// Terms describing the technique. arXiv matches them case-insensitively.
const TOPIC_TERMS: &[&str] = &["\"large language model\"", "LLM", "RAG"];

/// Terms describing the application domain.
const DOMAIN_TERMS: &[&str] = &["biostatistics", "medical", "clinical"];

/// Number of results requested per run.
pub const DEFAULT_MAX_RESULTS: usize = 15;

/// Builds the boolean search expression sent as `search_query`.
///
/// ```
/// assert_eq!(
///   paperfeed::query::search_query(),
///   r#"("large language model" OR LLM OR RAG) AND (biostatistics OR medical OR clinical)"#
/// );
/// ```
pub fn search_query() -> String {
  format!("{} AND {}", any_of(TOPIC_TERMS), any_of(DOMAIN_TERMS))
}

/// OR-combines a term group inside parentheses.
fn any_of(terms: &[&str]) -> String { format!("({})", terms.join(" OR ")) }

/// Field the API sorts results by.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum SortBy {
  /// Search relevance
  Relevance,
  /// Date of the most recent version
  LastUpdatedDate,
  /// Date the first version was submitted
  SubmittedDate,
}

impl std::fmt::Display for SortBy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SortBy::Relevance => write!(f, "relevance"),
      SortBy::LastUpdatedDate => write!(f, "lastUpdatedDate"),
      SortBy::SubmittedDate => write!(f, "submittedDate"),
    }
  }
}

/// Direction of the result ordering.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum SortOrder {
  /// Oldest first
  Ascending,
  /// Newest first
  Descending,
}

impl std::fmt::Display for SortOrder {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SortOrder::Ascending => write!(f, "ascending"),
      SortOrder::Descending => write!(f, "descending"),
    }
  }
}

/// Parameters of a single query API request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRequest {
  /// Boolean search expression
  pub search_query: String,
  /// Offset of the first result
  pub start:        usize,
  /// Maximum number of entries returned
  pub max_results:  usize,
  /// Sort field
  pub sort_by:      SortBy,
  /// Sort direction
  pub sort_order:   SortOrder,
}

impl Default for FeedRequest {
  fn default() -> Self {
    Self {
      search_query: search_query(),
      start:        0,
      max_results:  DEFAULT_MAX_RESULTS,
      sort_by:      SortBy::SubmittedDate,
      sort_order:   SortOrder::Descending,
    }
  }
}

impl FeedRequest {
  /// Renders the request as a full URL against `endpoint`.
  ///
  /// Parameters are form-encoded in the order `search_query`, `start`,
  /// `max_results`, `sortBy`, `sortOrder`.
  ///
  /// # Errors
  ///
  /// Returns [`FeedError::InvalidUrl`] if `endpoint` is not a valid URL.
  pub fn to_url(&self, endpoint: &str) -> Result<Url, FeedError> {
    let url = Url::parse_with_params(endpoint, &[
      ("search_query", self.search_query.clone()),
      ("start", self.start.to_string()),
      ("max_results", self.max_results.to_string()),
      ("sortBy", self.sort_by.to_string()),
      ("sortOrder", self.sort_order.to_string()),
    ])?;
    Ok(url)
  }
}
