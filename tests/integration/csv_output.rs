const BIN: &str = "issue-activity-report";

fn args<'a>(csv: &'a str) -> Vec<&'a str> {
  vec![
    "--projects",
    "TBR",
    "--from",
    "2025-07-01",
    "--to",
    "2025-07-03",
    "--in-progress-statuses",
    "In Progress",
    "--csv",
    csv,
  ]
}

#[test]
fn csv_written_with_header_and_rows() {
  let td = test_support::tempdir();
  let path = td.path().join("report.csv");
  let path_str = path.to_str().unwrap();

  let out = test_support::cmd_with_fixtures(BIN, "search_pages.json", "changelogs.json")
    .args(args(path_str))
    .output()
    .unwrap();
  assert!(out.status.success());
  assert!(String::from_utf8_lossy(&out.stdout).contains(&format!("CSV written: {path_str}")));

  let mut reader = csv::Reader::from_path(&path).unwrap();
  let headers = reader.headers().unwrap().clone();
  assert_eq!(headers.len(), 15);
  assert_eq!(&headers[0], "key");
  assert_eq!(&headers[6], "assignee_accountId");
  assert_eq!(&headers[14], "resolved");

  let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
  assert_eq!(records.len(), 3);
  assert_eq!(&records[0][0], "TBR-1");
  assert_eq!(&records[0][7], "Alice, Bob");
}

#[test]
fn csv_skipped_when_search_is_empty() {
  let td = test_support::tempdir();
  let path = td.path().join("empty.csv");
  let path_str = path.to_str().unwrap();

  let out = test_support::cmd_bin(BIN)
    .env(test_support::SEARCH_ENV, r#"{"issues": [], "isLast": true}"#)
    .args(args(path_str))
    .output()
    .unwrap();
  assert!(out.status.success());

  let stdout = String::from_utf8_lossy(&out.stdout);
  assert!(stdout.contains("Total issues: 0"));
  assert!(!stdout.contains("CSV written"));
  assert!(!path.exists());
}
