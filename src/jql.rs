// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build the activity search expression (status changed / was in-progress during the window)
// role: query/builder
// inputs: ActivityQuery (projects, dates, in-progress statuses, optional users, extra clause)
// outputs: JQL string ordered by updated DESC
// invariants: Values with whitespace or reserved words are double-quoted; clause order is stable
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

const RESERVED: &[&str] = &["in", "was", "during", "and", "or", "not"];

#[derive(Debug, Clone, Default)]
pub struct ActivityQuery<'a> {
  pub projects: &'a [String],
  pub date_from: &'a str,
  pub date_to: &'a str,
  pub in_progress_statuses: &'a [String],
  pub users: Option<&'a [String]>,
  pub use_account_id: bool,
  pub extra: Option<&'a str>,
}

pub fn quote_if_needed(value: &str) -> String {
  let lower = value.to_lowercase();
  if value.is_empty() || value.chars().any(char::is_whitespace) || RESERVED.contains(&lower.as_str()) {
    format!("\"{value}\"")
  } else {
    value.to_string()
  }
}

fn users_expr(users: &[String], use_account_id: bool) -> String {
  users
    .iter()
    .map(|u| {
      if use_account_id {
        format!("accountId(\"{u}\")")
      } else {
        quote_if_needed(u)
      }
    })
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn build_activity_jql(q: &ActivityQuery<'_>) -> String {
  let window = format!("(\"{}\", \"{}\")", q.date_from, q.date_to);
  let statuses = q
    .in_progress_statuses
    .iter()
    .map(|s| quote_if_needed(s))
    .collect::<Vec<_>>()
    .join(", ");

  let mut clauses = vec![
    format!("project in ({})", q.projects.join(", ")),
    format!("(status CHANGED DURING {window} OR status WAS IN ({statuses}) DURING {window})"),
  ];

  if let Some(users) = q.users.filter(|u| !u.is_empty()) {
    clauses.push(format!(
      "assignee WAS IN ({}) DURING {window}",
      users_expr(users, q.use_account_id)
    ));
  }

  if let Some(extra) = q.extra.filter(|e| !e.trim().is_empty()) {
    clauses.push(format!("({extra})"));
  }

  format!("{} ORDER BY updated DESC", clauses.join(" AND "))
}
