// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Jira Cloud REST backend for the IssueTracker seam (enhanced search + changelog)
// role: tracker/jira-http
// inputs: JiraConfig (base URL, credentials, timeout, retry budget) passed in at construction
// outputs: Lazy issue search iterator; full changelog per issue
// side_effects: Network calls to {base}/rest/api/3; sleeps between retries
// invariants:
// - Only transport errors, 429 and 5xx are retried, at most max_retries times with doubling backoff
// - Credentials never appear in Debug output or logs
// errors: Search failures -> SearchFailed; changelog failures -> HistoryFetchFailed(key)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, warn};

use crate::error::{ReportError, Result};
use crate::model::{IssueRecord, RawHistory};
use crate::tracker::paging::{collect_changelog, parse_search_page, Page, Paged, CHANGELOG_PAGE, SEARCH_BATCH};
use crate::tracker::IssueTracker;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
const BACKOFF_BASE_MS: u64 = 250;

/// Transport knobs chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
  pub timeout: Duration,
  pub max_retries: u32,
}

impl Default for TransportOptions {
  fn default() -> Self {
    Self {
      timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
      max_retries: DEFAULT_MAX_RETRIES,
    }
  }
}

#[derive(Clone)]
pub struct JiraConfig {
  pub base_url: String,
  pub email: String,
  pub api_token: String,
  pub transport: TransportOptions,
}

impl std::fmt::Debug for JiraConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JiraConfig")
      .field("base_url", &self.base_url)
      .field("email", &self.email)
      .field("api_token", &"<redacted>")
      .field("transport", &self.transport)
      .finish()
  }
}

fn required_env(name: &str) -> Result<String> {
  match std::env::var(name) {
    Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
    _ => Err(ReportError::MissingConfig(name.to_string())),
  }
}

impl JiraConfig {
  /// Read `JIRA_BASE_URL`, `JIRA_EMAIL` and `JIRA_API_TOKEN`.
  pub fn from_env(transport: TransportOptions) -> Result<Self> {
    Ok(Self {
      base_url: required_env("JIRA_BASE_URL")?.trim_end_matches('/').to_string(),
      email: required_env("JIRA_EMAIL")?,
      api_token: required_env("JIRA_API_TOKEN")?,
      transport,
    })
  }

  fn authorization(&self) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", self.email, self.api_token)))
  }
}

pub fn is_transient(status: u16) -> bool {
  status == 429 || (500..600).contains(&status)
}

pub fn backoff_delay(attempt: u32) -> Duration {
  Duration::from_millis(BACKOFF_BASE_MS.saturating_mul(1u64 << attempt.min(10)))
}

pub struct JiraHttpApi {
  config: JiraConfig,
  agent: ureq::Agent,
  authorization: String,
}

impl JiraHttpApi {
  pub fn new(config: JiraConfig) -> Self {
    let agent = ureq::AgentBuilder::new().timeout(config.transport.timeout).build();
    let authorization = config.authorization();
    Self {
      config,
      agent,
      authorization,
    }
  }

  fn request(&self, method: &str, url: &str) -> ureq::Request {
    self
      .agent
      .request(method, url)
      .set("Accept", "application/json")
      .set("User-Agent", "issue-activity-report")
      .set("Authorization", &self.authorization)
  }

  /// Run `send` until it succeeds, fails permanently, or the retry budget is spent.
  fn call_json<F>(&self, what: &str, send: F) -> std::result::Result<serde_json::Value, String>
  where
    F: Fn() -> std::result::Result<ureq::Response, ureq::Error>,
  {
    let mut attempt: u32 = 0;

    loop {
      let failure = match send() {
        Ok(resp) => {
          return resp
            .into_json::<serde_json::Value>()
            .map_err(|e| format!("decoding {what}: {e}"));
        }
        Err(ureq::Error::Status(code, resp)) => {
          let body = resp.into_string().unwrap_or_default();
          if !is_transient(code) {
            return Err(format!("{what} returned {code}: {body}"));
          }
          format!("{what} returned {code}")
        }
        Err(ureq::Error::Transport(t)) => format!("{what} transport error: {t}"),
      };

      if attempt >= self.config.transport.max_retries {
        return Err(failure);
      }
      let delay = backoff_delay(attempt);
      warn!(attempt = attempt + 1, delay_ms = delay.as_millis() as u64, "{failure}; retrying");
      std::thread::sleep(delay);
      attempt += 1;
    }
  }

  fn search_page(&self, jql: &str, fields: &[String], cursor: Option<&str>) -> Result<Page<IssueRecord>> {
    let url = format!("{}/rest/api/3/search/jql", self.config.base_url);
    let mut body = serde_json::json!({
      "jql": jql,
      "maxResults": SEARCH_BATCH.min(1000),
      "fields": fields,
    });
    if let Some(token) = cursor {
      body["nextPageToken"] = serde_json::Value::String(token.to_string());
    }

    debug!(cursor = ?cursor, "search page");
    let value = self
      .call_json("enhanced search", || self.request("POST", &url).send_json(body.clone()))
      .map_err(ReportError::SearchFailed)?;

    parse_search_page(value)
  }

  fn changelog_page(&self, key: &str, start_at: u64) -> Result<serde_json::Value> {
    let url = format!("{}/rest/api/3/issue/{}/changelog", self.config.base_url, key);
    let start = start_at.to_string();
    let page = CHANGELOG_PAGE.to_string();

    self
      .call_json("changelog", || {
        self
          .request("GET", &url)
          .query("startAt", &start)
          .query("maxResults", &page)
          .call()
      })
      .map_err(|reason| ReportError::history(key, reason))
  }
}

impl IssueTracker for JiraHttpApi {
  fn search<'a>(&'a self, jql: &str, fields: &[&str]) -> Box<dyn Iterator<Item = Result<IssueRecord>> + 'a> {
    let jql = jql.to_string();
    let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    Box::new(Paged::new(move |cursor: Option<&str>| self.search_page(&jql, &fields, cursor)))
  }

  fn changelog(&self, key: &str) -> Result<Vec<RawHistory>> {
    collect_changelog(key, |start_at| self.changelog_page(key, start_at))
  }
}
