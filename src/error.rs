// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed error taxonomy shared by window parsing, history replay, and tracker collaborators
// role: errors/types
// outputs: ReportError enum and Result alias
// invariants:
// - Date/window errors are fatal to a run; timestamp errors are local to one history record
// - HistoryFetchFailed always names the entity key
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

use crate::window::Instant;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
  #[error("invalid date {0:?}: expected YYYY-MM-DD")]
  InvalidDateFormat(String),

  #[error("invalid timestamp {0:?}")]
  InvalidTimestampFormat(String),

  #[error("malformed window: end {end} precedes start {start}")]
  MalformedWindow { start: Instant, end: Instant },

  #[error("failed to fetch change history for {key}: {reason}")]
  HistoryFetchFailed { key: String, reason: String },

  #[error("issue search failed: {0}")]
  SearchFailed(String),

  #[error("env var {0} is required")]
  MissingConfig(String),

  #[error("invalid fixture data: {0}")]
  Fixture(String),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Csv(#[from] csv::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

impl ReportError {
  pub fn history(key: &str, reason: impl Into<String>) -> Self {
    ReportError::HistoryFetchFailed {
      key: key.to_string(),
      reason: reason.into(),
    }
  }
}
