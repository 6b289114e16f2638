// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path lookups into loosely-typed tracker JSON (issue field maps, page envelopes)
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper for typed extraction with defaults
// invariants: No panics; missing paths and JSON null yield None; non_empty drops blank strings
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;

/// A located (or missing) JSON value awaiting typed extraction.
pub struct JsonFetched<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self
      .inner
      .filter(|v| !v.is_null())
      .and_then(|v| T::deserialize(v).ok())
  }

  /// Deserialize as `T`, returning `T::default()` on failure.
  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  /// String value with surrounding whitespace removed; blank strings count as missing.
  pub fn non_empty(&self) -> Option<String> {
    self
      .to::<String>()
      .map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty())
  }
}

/// Fetch nested values via dotted paths like "assignee.displayName".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let inner = path.split('.').try_fold(self, |cur, key| cur.get(key));

    JsonFetched { inner }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn issue_fields() -> serde_json::Value {
    serde_json::json!({
      "summary": "Fix login",
      "assignee": { "accountId": "u2", "displayName": "  Bob " },
      "status": { "name": "In Progress" },
      "resolutiondate": null,
      "labels": ["a", "b"]
    })
  }

  #[test]
  fn fetch_top_level_and_nested() {
    let v = issue_fields();

    assert_eq!(v.fetch("summary").to::<String>().as_deref(), Some("Fix login"));
    assert_eq!(v.fetch("status.name").to::<String>().as_deref(), Some("In Progress"));
    assert_eq!(v.fetch("labels").to::<Vec<String>>().map(|l| l.len()), Some(2));
    assert_eq!(v.fetch("missing.deeper").to::<String>(), None);
    assert!(v.fetch("").to::<serde_json::Value>().is_some());
  }

  #[test]
  fn null_reads_as_missing() {
    let v = issue_fields();
    assert_eq!(v.fetch("resolutiondate").to::<String>(), None);
    assert_eq!(v.fetch("resolutiondate").to_or_default::<String>(), "");
    assert_eq!(v.fetch("resolutiondate.name").to::<String>(), None);
  }

  #[test]
  fn non_empty_trims_and_drops_blank() {
    let v = serde_json::json!({ "a": "  Bob ", "b": "   ", "c": 3 });
    assert_eq!(v.fetch("a").non_empty().as_deref(), Some("Bob"));
    assert_eq!(v.fetch("b").non_empty(), None);
    assert_eq!(v.fetch("c").non_empty(), None);
  }
}
