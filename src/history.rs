// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Normalize raw paged changelog records into chronologically sorted transitions of one tracked field
// role: history/normalizer
// inputs: Raw changelog records (page order preserved), a TrackedField strategy
// outputs: Vec<ChangeEvent> ascending by occurred_at (stable; ties keep source order)
// side_effects: Logs skipped records at warn level
// invariants:
// - Records with a missing or unparseable timestamp are skipped, never fatal
// - Item order within a record is preserved
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use tracing::{debug, warn};

use crate::model::{ChangeEvent, Identity, RawChangeItem, RawHistory};
use crate::window::parse_event_timestamp;

/// Selects which field's changes form the ownership timeline.
pub trait TrackedField {
  fn name(&self) -> &str;

  fn matches(&self, item: &RawChangeItem) -> bool {
    item.field.as_deref() == Some(self.name())
  }

  fn from_identity(&self, item: &RawChangeItem) -> Identity {
    Identity::from_tracker(item.from.as_deref(), item.from_display.as_deref())
  }

  fn to_identity(&self, item: &RawChangeItem) -> Identity {
    Identity::from_tracker(item.to.as_deref(), item.to_display.as_deref())
  }
}

pub struct AssigneeField;

impl TrackedField for AssigneeField {
  fn name(&self) -> &str {
    "assignee"
  }
}

/// Flatten one entity's changelog into sorted transitions of `field`.
pub fn normalize_history(key: &str, records: &[RawHistory], field: &dyn TrackedField) -> Vec<ChangeEvent> {
  let mut events: Vec<ChangeEvent> = Vec::new();

  for record in records {
    let Some(created) = record.created.as_deref() else {
      warn!(key = %key, record = ?record.id, "skipping history record without timestamp");
      continue;
    };
    let occurred_at = match parse_event_timestamp(created) {
      Ok(t) => t,
      Err(err) => {
        warn!(key = %key, record = ?record.id, error = %err, "skipping history record");
        continue;
      }
    };

    for item in record.items.iter().filter(|i| field.matches(i)) {
      events.push(ChangeEvent {
        occurred_at,
        from: field.from_identity(item),
        to: field.to_identity(item),
      });
    }
  }

  // Pages are usually ordered already; the sort is stable so equal timestamps keep source order.
  events.sort_by_key(|e| e.occurred_at);

  debug!(key = %key, records = records.len(), events = events.len(), field = field.name(), "normalized history");

  events
}
