// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the data model shared by history replay, window intersection, and tracker collaborators
// role: model/types
// outputs: Identity, ChangeEvent, OwnershipInterval, WindowedHolder, IssueRecord, raw changelog records
// invariants: Derived types are immutable per query; raw records mirror tracker JSON field names
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};

use crate::ext::serde_json::JsonFetch;
use crate::window::Instant;

/// A holder of the tracked field. Either part may be missing; both missing
/// means "unassigned".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_name: Option<String>,
}

impl Identity {
  pub fn new(id: Option<&str>, display_name: Option<&str>) -> Self {
    Self {
      id: id.map(str::to_string),
      display_name: display_name.map(str::to_string),
    }
  }

  /// Like [`Identity::new`] for tracker-supplied strings: trims both parts
  /// and treats blank ones as absent.
  pub fn from_tracker(id: Option<&str>, display_name: Option<&str>) -> Self {
    let clean = |s: Option<&str>| s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
    Self {
      id: clean(id),
      display_name: clean(display_name),
    }
  }

  pub fn named(display_name: &str) -> Self {
    Self::new(None, Some(display_name))
  }

  pub fn is_unassigned(&self) -> bool {
    self.id.is_none() && self.display_name.is_none()
  }

  /// Display name when present, else the id.
  pub fn label(&self) -> Option<&str> {
    self.display_name.as_deref().or(self.id.as_deref())
  }
}

/// One recorded reassignment of the tracked field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
  pub occurred_at: Instant,
  pub from: Identity,
  pub to: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipInterval {
  pub start: Instant,
  pub end: Instant,
  pub holder: Identity,
}

/// The part of an ownership interval that falls inside the query window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowedHolder {
  pub identity: Identity,
  pub overlap_start: Instant,
  pub overlap_end: Instant,
}

// --- Raw tracker records ---

/// One changelog entry: a timestamp and the field changes made at that moment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHistory {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default)]
  pub created: Option<String>,
  #[serde(default)]
  pub items: Vec<RawChangeItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawChangeItem {
  #[serde(default)]
  pub field: Option<String>,
  #[serde(default)]
  pub from: Option<String>,
  #[serde(rename = "fromString", default)]
  pub from_display: Option<String>,
  #[serde(default)]
  pub to: Option<String>,
  #[serde(rename = "toString", default)]
  pub to_display: Option<String>,
}

/// An issue as returned by search: its key plus the loosely-typed field map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
  pub key: String,
  #[serde(default)]
  pub fields: serde_json::Value,
}

impl IssueRecord {
  pub fn summary(&self) -> String {
    self.fields.fetch("summary").to_or_default::<String>()
  }

  pub fn project_key(&self) -> String {
    self.fields.fetch("project.key").to_or_default::<String>()
  }

  pub fn issue_type(&self) -> String {
    self.fields.fetch("issuetype.name").to_or_default::<String>()
  }

  pub fn status(&self) -> String {
    self.fields.fetch("status.name").to_or_default::<String>()
  }

  /// Currently recorded assignee; unassigned when the field is null.
  pub fn current_assignee(&self) -> Identity {
    Identity {
      id: self.fields.fetch("assignee.accountId").non_empty(),
      display_name: self.fields.fetch("assignee.displayName").non_empty(),
    }
  }

  pub fn created(&self) -> String {
    self.fields.fetch("created").to_or_default::<String>()
  }

  pub fn updated(&self) -> String {
    self.fields.fetch("updated").to_or_default::<String>()
  }

  pub fn resolved(&self) -> String {
    self.fields.fetch("resolutiondate").to_or_default::<String>()
  }
}
