// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Intersect an ownership timeline with the query window to list who held the entity inside it
// role: timeline/intersection
// inputs: &[OwnershipInterval], Window
// outputs: WindowSummary (unique holders ordered by window entry, first/last, joined strings)
// invariants:
// - Every returned holder's interval overlaps the window; every overlapping interval's identity is returned
// - Ordering is by (overlap_start, overlap_end); duplicates keep their first occurrence
// - De-duplication key is the (id, display_name) pair
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;

use crate::model::{OwnershipInterval, WindowedHolder};
use crate::window::{overlaps, Window};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowSummary {
  pub holders: Vec<WindowedHolder>,
}

impl WindowSummary {
  pub fn first(&self) -> Option<&WindowedHolder> {
    self.holders.first()
  }

  pub fn last(&self) -> Option<&WindowedHolder> {
    self.holders.last()
  }

  /// Display names joined with ", " (holders without a name are skipped).
  pub fn display_names(&self) -> String {
    self
      .holders
      .iter()
      .filter_map(|h| h.identity.display_name.as_deref())
      .collect::<Vec<_>>()
      .join(", ")
  }

  /// Account ids joined with ", " (holders without an id are skipped).
  pub fn account_ids(&self) -> String {
    self
      .holders
      .iter()
      .filter_map(|h| h.identity.id.as_deref())
      .collect::<Vec<_>>()
      .join(", ")
  }

  pub fn first_display(&self) -> String {
    self
      .first()
      .and_then(|h| h.identity.display_name.clone())
      .unwrap_or_default()
  }

  pub fn last_display(&self) -> String {
    self
      .last()
      .and_then(|h| h.identity.display_name.clone())
      .unwrap_or_default()
  }
}

pub fn holders_in_window(intervals: &[OwnershipInterval], window: &Window) -> WindowSummary {
  let mut clipped: Vec<WindowedHolder> = intervals
    .iter()
    .filter(|iv| overlaps(iv.start, iv.end, window.start, window.end))
    .map(|iv| WindowedHolder {
      identity: iv.holder.clone(),
      overlap_start: iv.start.max(window.start),
      overlap_end: iv.end.min(window.end),
    })
    .collect();

  clipped.sort_by_key(|h| (h.overlap_start, h.overlap_end));

  let mut seen = HashSet::new();
  let holders = clipped
    .into_iter()
    .filter(|h| seen.insert(h.identity.clone()))
    .collect();

  WindowSummary { holders }
}
