// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Page-envelope parsing and pagination control flow shared by every tracker backend
// role: tracker/pagination
// inputs: Page-fetch closures returning raw JSON envelopes
// outputs: Lazy Paged<T> iterator (token-based search); collected changelog records (offset-based)
// invariants:
// - Paged stops after the first error, a missing next token, or a repeated token on an empty page
// - Changelog paging follows `total` when present, else `isLast` (default true)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::VecDeque;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::model::{IssueRecord, RawHistory};

pub const SEARCH_BATCH: usize = 300;
pub const CHANGELOG_PAGE: u64 = 100;

pub struct Page<T> {
  pub items: Vec<T>,
  pub next: Option<String>,
}

/// Lazy, finite sequence over a token-paginated source. Each page is fetched
/// only when the previous one is drained.
pub struct Paged<T, F> {
  fetch: F,
  buffer: VecDeque<T>,
  cursor: Option<String>,
  exhausted: bool,
}

impl<T, F> Paged<T, F>
where
  F: FnMut(Option<&str>) -> Result<Page<T>>,
{
  pub fn new(fetch: F) -> Self {
    Self {
      fetch,
      buffer: VecDeque::new(),
      cursor: None,
      exhausted: false,
    }
  }
}

impl<T, F> Iterator for Paged<T, F>
where
  F: FnMut(Option<&str>) -> Result<Page<T>>,
{
  type Item = Result<T>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if let Some(item) = self.buffer.pop_front() {
        return Some(Ok(item));
      }
      if self.exhausted {
        return None;
      }

      match (self.fetch)(self.cursor.as_deref()) {
        Ok(page) => {
          let stalled = page.items.is_empty() && page.next.is_some() && page.next == self.cursor;
          self.buffer.extend(page.items);
          self.cursor = page.next;
          if self.cursor.is_none() || stalled {
            self.exhausted = true;
          }
        }
        Err(err) => {
          self.exhausted = true;
          return Some(Err(err));
        }
      }
    }
  }
}

#[derive(Deserialize)]
struct SearchEnvelope {
  #[serde(default)]
  issues: Vec<IssueRecord>,
  #[serde(rename = "isLast", default)]
  is_last: bool,
  #[serde(rename = "nextPageToken", default)]
  next_page_token: Option<String>,
}

/// Parse one enhanced-search response page.
pub fn parse_search_page(value: serde_json::Value) -> Result<Page<IssueRecord>> {
  let env: SearchEnvelope =
    serde_json::from_value(value).map_err(|e| ReportError::SearchFailed(format!("unexpected search response: {e}")))?;

  let next = if env.is_last {
    None
  } else {
    env.next_page_token.filter(|t| !t.is_empty())
  };

  Ok(Page { items: env.issues, next })
}

#[derive(Deserialize)]
struct ChangelogEnvelope {
  #[serde(default)]
  values: Option<Vec<RawHistory>>,
  #[serde(default)]
  histories: Option<Vec<RawHistory>>,
  #[serde(default)]
  total: Option<u64>,
  #[serde(rename = "isLast", default)]
  is_last: Option<bool>,
}

/// Drain an offset-paginated changelog. `fetch_page` receives `startAt`.
pub fn collect_changelog<F>(key: &str, mut fetch_page: F) -> Result<Vec<RawHistory>>
where
  F: FnMut(u64) -> Result<serde_json::Value>,
{
  let mut records: Vec<RawHistory> = Vec::new();
  let mut start_at: u64 = 0;

  loop {
    let raw = fetch_page(start_at)?;
    let env: ChangelogEnvelope =
      serde_json::from_value(raw).map_err(|e| ReportError::history(key, format!("unexpected changelog response: {e}")))?;

    let page = env.values.or(env.histories).unwrap_or_default();
    let page_len = page.len();
    records.extend(page);

    debug!(key = %key, start_at, page_len, total = ?env.total, "changelog page");

    start_at += CHANGELOG_PAGE;
    match env.total {
      Some(total) if start_at < total => continue,
      Some(_) => break,
      None if !env.is_last.unwrap_or(true) && page_len > 0 => continue,
      None => break,
    }
  }

  Ok(records)
}
