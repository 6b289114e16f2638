use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::matcher::MatchMode;
use crate::tracker::jira_http::{TransportOptions, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::util;
use crate::window::Window;

#[derive(Parser, Debug)]
#[command(
    name = "issue-activity-report",
    version,
    about = "List Jira issues active in a date window and who was assigned while they were",
    long_about = None
)]
pub struct Cli {
  /// Comma-separated project keys, e.g. TBR,IONG
  #[arg(long, required_unless_present = "gen_man")]
  pub projects: Option<String>,

  /// Window start date (YYYY-MM-DD, inclusive, UTC)
  #[arg(long = "from", required_unless_present = "gen_man")]
  pub date_from: Option<String>,

  /// Window end date (YYYY-MM-DD, inclusive, UTC)
  #[arg(long = "to", required_unless_present = "gen_man")]
  pub date_to: Option<String>,

  /// Comma-separated statuses that count as "being worked on", e.g. "In Progress,Code Review"
  #[arg(long, required_unless_present = "gen_man")]
  pub in_progress_statuses: Option<String>,

  /// Comma-separated users to filter on (display names, or account ids with --use-accountid)
  #[arg(long)]
  pub users: Option<String>,

  /// Treat --users as account ids instead of display names
  #[arg(long = "use-accountid")]
  pub use_accountid: bool,

  /// Extra JQL clause ANDed into the query, e.g. 'issuetype in (Bug, Story)'
  #[arg(long)]
  pub extra_jql: Option<String>,

  /// Also write rows to this CSV file (skipped when there are no rows)
  #[arg(long)]
  pub csv: Option<PathBuf>,

  /// Print a JSON document instead of the console listing
  #[arg(long)]
  pub json: bool,

  /// Per-request HTTP timeout in seconds
  #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
  pub timeout_secs: u64,

  /// Retries for transient HTTP failures (429, 5xx, transport)
  #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
  pub max_retries: u32,

  /// Debug-level logging on stderr (RUST_LOG overrides)
  #[arg(long, short = 'v')]
  pub verbose: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub projects: Vec<String>,
  pub date_from: String,
  pub date_to: String,
  pub window: Window,
  pub in_progress_statuses: Vec<String>,
  pub users: Option<Vec<String>>,
  pub match_mode: MatchMode,
  pub extra_jql: Option<String>,
  pub csv: Option<PathBuf>,
  pub json: bool,
  pub transport: TransportOptions,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let projects = util::csv_list(cli.projects.as_deref().unwrap_or_default());
  if projects.is_empty() {
    bail!("--projects cannot be empty");
  }

  let in_progress_statuses = util::csv_list(cli.in_progress_statuses.as_deref().unwrap_or_default());
  if in_progress_statuses.is_empty() {
    bail!("--in-progress-statuses cannot be empty");
  }

  // Validated before any tracker is built.
  let date_from = cli.date_from.as_deref().unwrap_or_default().trim().to_string();
  let date_to = cli.date_to.as_deref().unwrap_or_default().trim().to_string();
  let window = Window::from_calendar_dates(&date_from, &date_to)?;

  let users = cli.users.as_deref().map(util::csv_list).filter(|u| !u.is_empty());
  let extra_jql = cli
    .extra_jql
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty());

  let match_mode = if cli.use_accountid {
    MatchMode::AccountId
  } else {
    MatchMode::DisplayName
  };

  Ok(EffectiveConfig {
    projects,
    date_from,
    date_to,
    window,
    in_progress_statuses,
    users,
    match_mode,
    extra_jql,
    csv: cli.csv,
    json: cli.json,
    transport: TransportOptions {
      timeout: Duration::from_secs(cli.timeout_secs.max(1)),
      max_retries: cli.max_retries,
    },
  })
}
