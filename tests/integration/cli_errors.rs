use predicates::prelude::*;

const BIN: &str = "issue-activity-report";

fn base_args() -> Vec<&'static str> {
  vec![
    "--projects",
    "TBR",
    "--from",
    "2025-07-01",
    "--to",
    "2025-07-31",
    "--in-progress-statuses",
    "In Progress",
  ]
}

#[test]
fn missing_required_flags_is_usage_error() {
  test_support::cmd_bin(BIN)
    .args(["--projects", "TBR"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--from"));
}

#[test]
fn reversed_window_fails_before_credentials_are_read() {
  let mut args = base_args();
  args[3] = "2025-08-01";
  test_support::cmd_bin(BIN)
    .args(&args)
    .assert()
    .failure()
    .stderr(predicate::str::contains("malformed window"))
    .stderr(predicate::str::contains("JIRA_BASE_URL").not());
}

#[test]
fn bad_date_format_is_rejected() {
  let mut args = base_args();
  args[5] = "31/07/2025";
  test_support::cmd_bin(BIN)
    .args(&args)
    .assert()
    .failure()
    .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn empty_status_list_is_rejected() {
  let mut args = base_args();
  args[7] = " , ";
  test_support::cmd_bin(BIN)
    .args(&args)
    .assert()
    .failure()
    .stderr(predicate::str::contains("--in-progress-statuses cannot be empty"));
}

#[test]
fn missing_jira_env_names_the_variable() {
  test_support::cmd_bin(BIN)
    .args(base_args())
    .assert()
    .failure()
    .stderr(predicate::str::contains("env var JIRA_BASE_URL is required"));
}
