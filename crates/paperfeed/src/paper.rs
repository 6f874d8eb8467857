//! The normalized paper record written to the feed.
//!
//! Every field is always present. Missing feed data becomes an empty string or
//! an empty list, never a null or an omitted key, so consumers of the JSON
//! never need to guard against absent properties.

use super::*;

/// Path segment that precedes the identifier in an abstract page URL.
const ABS_MARKER: &str = "/abs/";

/// A paper as it appears in the output feed.
///
/// Fields are declared in output order; serde emits keys in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
  /// Title with surrounding whitespace removed
  pub title:         String,
  /// Author names in feed order
  pub authors:       Vec<String>,
  /// Abstract with surrounding whitespace removed
  #[serde(rename = "abstract")]
  pub abstract_text: String,
  /// Link to the PDF, explicit or derived from the identifier
  pub pdf_url:       String,
  /// Link to the abstract page
  pub arxiv_url:     String,
  /// Publication timestamp exactly as given by the feed
  pub published:     String,
  /// Last update timestamp exactly as given by the feed
  pub updated:       String,
  /// Category terms in feed order
  pub categories:    Vec<String>,
  /// Catalog identifier taken from the abstract page URL
  #[serde(skip)]
  pub identifier:    Option<String>,
}

/// Extracts the identifier from an abstract page URL.
///
/// The identifier is whatever follows the last `/abs/`. URLs without the
/// marker are returned unchanged.
///
/// ```
/// use paperfeed::paper::identifier_from_url;
///
/// assert_eq!(identifier_from_url("http://arxiv.org/abs/2501.00001v2"), "2501.00001v2");
/// assert_eq!(identifier_from_url("http://arxiv.org/abs/hep-th/9901001"), "hep-th/9901001");
/// assert_eq!(identifier_from_url("2501.00001"), "2501.00001");
/// ```
pub fn identifier_from_url(url: &str) -> &str {
  url.rsplit_once(ABS_MARKER).map_or(url, |(_, identifier)| identifier)
}

/// Builds the PDF location for an identifier.
///
/// ```
/// assert_eq!(paperfeed::paper::pdf_url_for("2501.00001"), "http://arxiv.org/pdf/2501.00001.pdf");
/// ```
pub fn pdf_url_for(identifier: &str) -> String { format!("http://arxiv.org/pdf/{identifier}.pdf") }
