// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Offline IssueTracker backed by recorded JSON pages (tests and dry runs without network)
// role: tracker/fixture
// inputs: IAR_TEST_SEARCH_JSON (search page or array of pages), IAR_TEST_CHANGELOG_JSON (key -> pages | {"status": N})
// outputs: Same iterator/collection shapes as the HTTP backend, via the shared paging helpers
// invariants:
// - Search cursors are page indexes rendered as strings ("1", "2", ...)
// - Unknown issue keys have an empty changelog; {"status": N} simulates a failed fetch
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::{json, Value};

use crate::error::{ReportError, Result};
use crate::ext::serde_json::JsonFetch;
use crate::model::{IssueRecord, RawHistory};
use crate::tracker::paging::{collect_changelog, parse_search_page, Paged, CHANGELOG_PAGE};
use crate::tracker::IssueTracker;

pub const SEARCH_ENV: &str = "IAR_TEST_SEARCH_JSON";
pub const CHANGELOG_ENV: &str = "IAR_TEST_CHANGELOG_JSON";

pub fn env_wants_fixture() -> bool {
  std::env::var(SEARCH_ENV).is_ok()
}

pub struct FixtureTracker {
  search_pages: Vec<Value>,
  changelogs: serde_json::Map<String, Value>,
}

impl FixtureTracker {
  pub fn new(search: Value, changelogs: Value) -> Result<Self> {
    let search_pages = match search {
      Value::Array(pages) => pages,
      page @ Value::Object(_) => vec![page],
      other => return Err(ReportError::Fixture(format!("search fixture must be a page or array of pages, got {other}"))),
    };
    let changelogs = match changelogs {
      Value::Object(map) => map,
      Value::Null => serde_json::Map::new(),
      other => return Err(ReportError::Fixture(format!("changelog fixture must be an object, got {other}"))),
    };
    Ok(Self {
      search_pages,
      changelogs,
    })
  }

  pub fn from_env() -> Result<Self> {
    let search = std::env::var(SEARCH_ENV).map_err(|_| ReportError::MissingConfig(SEARCH_ENV.to_string()))?;
    let changelogs = std::env::var(CHANGELOG_ENV).unwrap_or_else(|_| "{}".to_string());
    Self::new(serde_json::from_str(&search)?, serde_json::from_str(&changelogs)?)
  }

  fn search_page_at(&self, cursor: Option<&str>) -> Result<Value> {
    let index = match cursor {
      None => 0,
      Some(token) => token
        .parse::<usize>()
        .map_err(|_| ReportError::SearchFailed(format!("unknown page token {token:?}")))?,
    };
    Ok(
      self
        .search_pages
        .get(index)
        .cloned()
        .unwrap_or_else(|| json!({ "issues": [], "isLast": true })),
    )
  }

  fn changelog_page_at(key: &str, pages: &[Value], start_at: u64) -> Value {
    let index = (start_at / CHANGELOG_PAGE) as usize;
    pages.get(index).cloned().unwrap_or_else(|| {
      tracing::debug!(key = %key, start_at, "fixture has no further changelog pages");
      json!({ "values": [], "isLast": true })
    })
  }
}

impl IssueTracker for FixtureTracker {
  fn search<'a>(&'a self, _jql: &str, _fields: &[&str]) -> Box<dyn Iterator<Item = Result<IssueRecord>> + 'a> {
    Box::new(Paged::new(move |cursor: Option<&str>| {
      self.search_page_at(cursor).and_then(parse_search_page)
    }))
  }

  fn changelog(&self, key: &str) -> Result<Vec<RawHistory>> {
    match self.changelogs.get(key) {
      None => Ok(Vec::new()),
      Some(Value::Array(pages)) => collect_changelog(key, |start_at| Ok(Self::changelog_page_at(key, pages, start_at))),
      Some(failure) => {
        let status = failure.fetch("status").to::<u16>().unwrap_or(500);
        Err(ReportError::history(key, format!("changelog returned {status}")))
      }
    }
  }
}
