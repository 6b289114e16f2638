// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Highlight which window holders appear in a user-supplied filter list
// role: matching/filter
// inputs: Ordered unique holders, optional filter strings, MatchMode (display name vs account id)
// outputs: Ordered, de-duplicated display strings of matching holders
// invariants:
// - Comparison trims and case-folds both sides
// - Absent or empty filter yields no matches (not a wildcard)
// - Output keeps holder order; duplicates keep first occurrence
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;

use crate::model::WindowedHolder;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum MatchMode {
  #[default]
  DisplayName,
  AccountId,
}

fn fold(s: &str) -> String {
  s.trim().to_lowercase()
}

pub fn match_holders(holders: &[WindowedHolder], filter: Option<&[String]>, mode: MatchMode) -> Vec<String> {
  let wanted: HashSet<String> = filter
    .unwrap_or_default()
    .iter()
    .map(|u| fold(u))
    .filter(|u| !u.is_empty())
    .collect();

  if wanted.is_empty() {
    return Vec::new();
  }

  let mut seen = HashSet::new();
  let mut out = Vec::new();

  for h in holders {
    let identity = &h.identity;
    let shown = match mode {
      MatchMode::AccountId => identity
        .id
        .as_deref()
        .filter(|id| wanted.contains(&fold(id)))
        .map(|id| identity.display_name.as_deref().unwrap_or(id)),
      MatchMode::DisplayName => identity
        .display_name
        .as_deref()
        .filter(|name| wanted.contains(&fold(name))),
    };

    if let Some(s) = shown {
      if seen.insert(s.to_string()) {
        out.push(s.to_string());
      }
    }
  }

  out
}
