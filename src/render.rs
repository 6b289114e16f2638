// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Write report rows to the console listing, a JSON envelope, or a CSV file
// role: rendering/output
// inputs: JQL text, reporting Window, ordered ReportRow slice
// outputs: Human listing or pretty JSON on the given writer; CSV file with header + rows
// side_effects: write_csv creates/truncates the target file
// invariants:
// - Row order is preserved in every sink
// - CSV columns follow ReportRow field order; no file is created for an empty row set
// errors: IO/CSV/JSON failures bubble as ReportError
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::report::ReportRow;
use crate::window::{format_instant, Window};

#[derive(Serialize)]
struct WindowOut {
  start: String,
  end: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
  jql: &'a str,
  window: WindowOut,
  total: usize,
  rows: &'a [ReportRow],
}

pub fn console_line(row: &ReportRow) -> String {
  format!(
    "{} — {}  [{} / {}]  Status: {}  Assignee (current): {}  Assignee(s) in window: {}",
    row.key,
    row.summary,
    row.project,
    row.issue_type,
    row.status,
    row.assignee_display,
    row.assignees_during_window_display
  )
}

pub fn write_console<W: Write>(out: &mut W, jql: &str, rows: &[ReportRow]) -> Result<()> {
  writeln!(out, "\nJQL:\n{jql}\n")?;
  writeln!(out, "Total issues: {}\n", rows.len())?;
  for row in rows {
    writeln!(out, "{}", console_line(row))?;
  }
  Ok(())
}

pub fn write_json<W: Write>(out: &mut W, jql: &str, window: &Window, rows: &[ReportRow]) -> Result<()> {
  let report = JsonReport {
    jql,
    window: WindowOut {
      start: format_instant(window.start),
      end: format_instant(window.end),
    },
    total: rows.len(),
    rows,
  };
  serde_json::to_writer_pretty(&mut *out, &report)?;
  writeln!(out)?;
  Ok(())
}

/// Write rows as CSV. Returns `false` (and touches nothing) when there are no rows.
pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<bool> {
  if rows.is_empty() {
    return Ok(false);
  }

  let mut writer = csv::Writer::from_path(path)?;
  for row in rows {
    writer.serialize(row)?;
  }
  writer.flush()?;

  Ok(true)
}
