// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Rebuild a gap-free ownership timeline from sorted transitions (or a fallback holder)
// role: timeline/reconstruction
// inputs: Sorted Vec<ChangeEvent>, fallback Identity for entities with no transitions
// outputs: Vec<OwnershipInterval> covering [BEGINNING_OF_TIME, END_OF_TIME]
// invariants:
// - Intervals are contiguous: interval[i].end + epsilon == interval[i+1].start
// - No interval is inverted; transitions sharing one instant are coalesced first
// - n distinct-instant transitions produce n+1 intervals
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::model::{ChangeEvent, Identity, OwnershipInterval};
use crate::window::{just_before, BEGINNING_OF_TIME, END_OF_TIME};

/// Merge runs of transitions that share one instant into a single transition
/// from the run's first `from` to its last `to`. Holders that only existed
/// inside the run (zero duration) are dropped.
pub fn coalesce_same_instant(events: &[ChangeEvent]) -> Vec<ChangeEvent> {
  let mut out: Vec<ChangeEvent> = Vec::with_capacity(events.len());

  for event in events {
    match out.last_mut() {
      Some(prev) if prev.occurred_at == event.occurred_at => prev.to = event.to.clone(),
      _ => out.push(event.clone()),
    }
  }

  out
}

/// Replay transitions into ownership intervals spanning all time.
///
/// With no transitions the fallback (current) holder owns the whole timeline.
pub fn reconstruct(events: &[ChangeEvent], fallback: &Identity) -> Vec<OwnershipInterval> {
  debug_assert!(events.windows(2).all(|w| w[0].occurred_at <= w[1].occurred_at));

  let events = coalesce_same_instant(events);

  let (Some(first), Some(last)) = (events.first(), events.last()) else {
    return vec![OwnershipInterval {
      start: BEGINNING_OF_TIME,
      end: END_OF_TIME,
      holder: fallback.clone(),
    }];
  };

  let mut intervals = Vec::with_capacity(events.len() + 1);

  intervals.push(OwnershipInterval {
    start: BEGINNING_OF_TIME,
    end: just_before(first.occurred_at),
    holder: first.from.clone(),
  });

  for pair in events.windows(2) {
    intervals.push(OwnershipInterval {
      start: pair[0].occurred_at,
      end: just_before(pair[1].occurred_at),
      holder: pair[0].to.clone(),
    });
  }

  intervals.push(OwnershipInterval {
    start: last.occurred_at,
    end: END_OF_TIME,
    holder: last.to.clone(),
  });

  intervals
}
