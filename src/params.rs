use crate::cli::EffectiveConfig;
use crate::jql::ActivityQuery;
use crate::matcher::MatchMode;
use crate::report::ReportRequest;

pub fn build_activity_query(cfg: &EffectiveConfig) -> ActivityQuery<'_> {
  ActivityQuery {
    projects: &cfg.projects,
    date_from: &cfg.date_from,
    date_to: &cfg.date_to,
    in_progress_statuses: &cfg.in_progress_statuses,
    users: cfg.users.as_deref(),
    use_account_id: matches!(cfg.match_mode, MatchMode::AccountId),
    extra: cfg.extra_jql.as_deref(),
  }
}

pub fn build_report_request(cfg: &EffectiveConfig) -> ReportRequest {
  ReportRequest {
    window: cfg.window,
    users: cfg.users.clone(),
    match_mode: cfg.match_mode,
  }
}
