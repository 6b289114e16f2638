// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate per-issue processing: fetch history, replay ownership, intersect window, match users, emit rows
// role: processing/orchestrator
// inputs: IssueTracker backend, JQL, ReportRequest (window, optional user filter, match mode)
// outputs: Vec<ReportRow> in search order; rendered console/JSON/CSV output via render
// side_effects: Tracker calls (network in production); stdout/CSV writes in `process`
// invariants:
// - Issues are processed sequentially; no state crosses issue boundaries
// - A failed history fetch degrades only that issue's row (empty history -> current assignee)
// - Search failure aborts the run before any output is written
// errors: Fatal errors propagate with context; per-issue errors are logged with the issue key
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cli::EffectiveConfig;
use crate::history::{normalize_history, AssigneeField};
use crate::intersect::holders_in_window;
use crate::matcher::{match_holders, MatchMode};
use crate::model::{IssueRecord, RawHistory};
use crate::params::{build_activity_query, build_report_request};
use crate::render;
use crate::timeline::reconstruct;
use crate::tracker::{IssueTracker, SEARCH_FIELDS};
use crate::window::Window;

/// Per-run inputs to row assembly.
#[derive(Debug, Clone)]
pub struct ReportRequest {
  pub window: Window,
  pub users: Option<Vec<String>>,
  pub match_mode: MatchMode,
}

/// One output row; field order is the column order of CSV output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
  pub key: String,
  pub summary: String,
  pub project: String,
  #[serde(rename = "type")]
  pub issue_type: String,
  pub status: String,
  pub assignee_display: String,
  #[serde(rename = "assignee_accountId")]
  pub assignee_account_id: String,
  pub assignees_during_window_display: String,
  #[serde(rename = "assignees_during_window_accountIds")]
  pub assignees_during_window_account_ids: String,
  pub matched_assignees_during_window: String,
  pub first_assignee_in_window: String,
  pub last_assignee_in_window: String,
  pub created: String,
  pub updated: String,
  pub resolved: String,
}

/// Build the row for one issue from its already-fetched change history.
pub fn build_row(issue: &IssueRecord, records: &[RawHistory], request: &ReportRequest) -> ReportRow {
  let current = issue.current_assignee();
  let events = normalize_history(&issue.key, records, &AssigneeField);
  let timeline = reconstruct(&events, &current);
  let window = holders_in_window(&timeline, &request.window);

  let matched = match request.users.as_deref() {
    Some(users) => match_holders(&window.holders, Some(users), request.match_mode).join(", "),
    None => String::new(),
  };

  ReportRow {
    key: issue.key.clone(),
    summary: issue.summary(),
    project: issue.project_key(),
    issue_type: issue.issue_type(),
    status: issue.status(),
    assignee_display: current.display_name.clone().unwrap_or_default(),
    assignee_account_id: current.id.clone().unwrap_or_default(),
    assignees_during_window_display: window.display_names(),
    assignees_during_window_account_ids: window.account_ids(),
    matched_assignees_during_window: matched,
    first_assignee_in_window: window.first_display(),
    last_assignee_in_window: window.last_display(),
    created: issue.created(),
    updated: issue.updated(),
    resolved: issue.resolved(),
  }
}

/// Fetch one issue's history and build its row; a failed fetch falls back to
/// an empty history so the current assignee stands in for the whole window.
pub fn process_issue(tracker: &dyn IssueTracker, issue: &IssueRecord, request: &ReportRequest) -> ReportRow {
  let records = match tracker.changelog(&issue.key) {
    Ok(records) => records,
    Err(err) => {
      warn!(key = %issue.key, error = %err, "change history unavailable; using current assignee");
      Vec::new()
    }
  };

  build_row(issue, &records, request)
}

/// Run the search and build every row, in search order.
pub fn collect_rows(tracker: &dyn IssueTracker, jql: &str, request: &ReportRequest) -> Result<Vec<ReportRow>> {
  let mut rows = Vec::new();

  for issue in tracker.search(jql, SEARCH_FIELDS) {
    let issue = issue.context("searching issues")?;
    rows.push(process_issue(tracker, &issue, request));
  }

  info!(count = rows.len(), "report rows built");
  Ok(rows)
}

/// End-to-end run: query, build rows, then write console/JSON and optional CSV.
pub fn process(cfg: &EffectiveConfig, tracker: &dyn IssueTracker) -> Result<()> {
  let jql = crate::jql::build_activity_jql(&build_activity_query(cfg));
  let request = build_report_request(cfg);

  let rows = collect_rows(tracker, &jql, &request)?;

  let stdout = std::io::stdout();
  let mut out = stdout.lock();

  if cfg.json {
    render::write_json(&mut out, &jql, &request.window, &rows)?;
  } else {
    render::write_console(&mut out, &jql, &rows)?;
  }

  if let Some(path) = cfg.csv.as_deref() {
    let written = render::write_csv(path, &rows).with_context(|| format!("writing CSV {}", path.display()))?;
    if written && !cfg.json {
      writeln!(out, "\nCSV written: {}", path.display())?;
    } else if written {
      info!(path = %path.display(), "CSV written");
    }
  }

  Ok(())
}
