// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Seam between report orchestration and the issue tracker (search + change history)
// role: tracker/namespace
// outputs: IssueTracker trait, backend selection (Jira HTTP or env fixtures)
// invariants: Pagination is hidden behind the trait; callers iterate issues and receive whole changelogs
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod fixture;
pub mod jira_http;
pub mod paging;

use crate::error::Result;
use crate::model::{IssueRecord, RawHistory};

use self::fixture::{env_wants_fixture, FixtureTracker};
use self::jira_http::{JiraConfig, JiraHttpApi, TransportOptions};

/// Fields requested from search; enough to fill one report row.
pub const SEARCH_FIELDS: &[&str] = &[
  "key",
  "summary",
  "assignee",
  "status",
  "issuetype",
  "project",
  "updated",
  "created",
  "resolutiondate",
];

pub trait IssueTracker {
  /// Lazily iterate issues matching `jql`. Every call starts a fresh pagination.
  fn search<'a>(&'a self, jql: &str, fields: &[&str]) -> Box<dyn Iterator<Item = Result<IssueRecord>> + 'a>;

  /// The complete change history of one issue, in page order.
  fn changelog(&self, key: &str) -> Result<Vec<RawHistory>>;
}

/// Pick a backend: recorded fixtures when `IAR_TEST_SEARCH_JSON` is set,
/// otherwise Jira over HTTP with credentials from the environment.
pub fn build_tracker(transport: TransportOptions) -> Result<Box<dyn IssueTracker>> {
  if env_wants_fixture() {
    tracing::info!("using fixture tracker from environment");
    return Ok(Box::new(FixtureTracker::from_env()?));
  }

  let config = JiraConfig::from_env(transport)?;
  tracing::info!(base_url = %config.base_url, "using Jira tracker");
  Ok(Box::new(JiraHttpApi::new(config)))
}
