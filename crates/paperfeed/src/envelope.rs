//! The top-level document written for each run.

use super::*;

/// Papers of one run together with when and how they were obtained.
///
/// # Examples
///
/// ```
/// use paperfeed::{envelope::ResultEnvelope, paper::Paper};
///
/// let envelope = ResultEnvelope::new("LLM AND clinical", vec![Paper::default()]);
/// assert_eq!(envelope.count, 1);
/// assert!(envelope.generated_at_utc.ends_with('Z'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEnvelope {
  /// Creation instant, ISO-8601 in UTC with a `Z` suffix
  pub generated_at_utc: String,
  /// Search expression the papers were fetched with
  pub search_query:     String,
  /// Number of papers, always `papers.len()`
  pub count:            usize,
  /// Papers in feed order
  pub papers:           Vec<Paper>,
}

impl ResultEnvelope {
  /// Wraps `papers`, stamped with the current time.
  pub fn new(search_query: &str, papers: Vec<Paper>) -> Self {
    Self::at(Utc::now(), search_query, papers)
  }

  /// Wraps `papers`, stamped with `generated_at`.
  pub fn at(generated_at: DateTime<Utc>, search_query: &str, papers: Vec<Paper>) -> Self {
    Self {
      generated_at_utc: generated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
      search_query: search_query.to_owned(),
      count: papers.len(),
      papers,
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn test_timestamp_format() {
    let instant = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let envelope = ResultEnvelope::at(instant, "q", Vec::new());
    assert_eq!(envelope.generated_at_utc, "2025-01-02T03:04:05.000000Z");
  }

  #[test]
  fn test_count_matches_papers() {
    let papers = vec![Paper::default(), Paper::default(), Paper::default()];
    let envelope = ResultEnvelope::new("q", papers.clone());
    assert_eq!(envelope.count, 3);
    assert_eq!(envelope.papers, papers);
    assert_eq!(envelope.search_query, "q");
  }

  #[test]
  fn test_json_key_order() {
    let instant = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let json = serde_json::to_string(&ResultEnvelope::at(instant, "q", Vec::new())).unwrap();
    assert_eq!(
      json,
      r#"{"generated_at_utc":"2025-01-02T03:04:05.000000Z","search_query":"q","count":0,"papers":[]}"#
    );
  }

  #[test]
  fn test_json_round_trip_count() {
    let envelope = ResultEnvelope::new("q", vec![Paper::default(); 2]);
    let json = serde_json::to_string_pretty(&envelope).unwrap();
    let decoded: ResultEnvelope = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.count, decoded.papers.len());
    assert_eq!(decoded, envelope);
  }
}
