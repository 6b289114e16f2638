use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ReportError, Result};

// Window and instant handling lives here; everything is normalized to UTC.

pub type Instant = DateTime<Utc>;

/// "Since the beginning of time" sentinel for open-ended ownership intervals.
pub const BEGINNING_OF_TIME: Instant = DateTime::<Utc>::MIN_UTC;

/// "Until the end of time" sentinel for the current holder's interval.
pub const END_OF_TIME: Instant = DateTime::<Utc>::MAX_UTC;

/// Smallest time unit the tracker reports (milliseconds).
pub fn epsilon() -> chrono::Duration {
  chrono::Duration::milliseconds(1)
}

/// The instant one epsilon before `t`, saturating at the beginning of time.
pub fn just_before(t: Instant) -> Instant {
  t.checked_sub_signed(epsilon()).unwrap_or(t)
}

static RE_YMD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Parse a strict `YYYY-MM-DD` date as UTC midnight, or as 23:59:59.999
/// when `end_of_day` is set (inclusive end date).
pub fn parse_calendar_date(s: &str, end_of_day: bool) -> Result<Instant> {
  if !RE_YMD.is_match(s) {
    return Err(ReportError::InvalidDateFormat(s.to_string()));
  }
  let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ReportError::InvalidDateFormat(s.to_string()))?;

  let naive = if end_of_day {
    date.and_hms_milli_opt(23, 59, 59, 999)
  } else {
    date.and_hms_opt(0, 0, 0)
  };
  let naive = naive.ok_or_else(|| ReportError::InvalidDateFormat(s.to_string()))?;

  Ok(Utc.from_utc_datetime(&naive))
}

/// Parse a tracker timestamp such as `2025-07-15T09:12:34.123+0000` into UTC.
/// RFC 3339 (`...Z` / `+00:00`) is accepted as well.
pub fn parse_event_timestamp(s: &str) -> Result<Instant> {
  DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z")
    .or_else(|_| DateTime::parse_from_rfc3339(s))
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|_| ReportError::InvalidTimestampFormat(s.to_string()))
}

/// Closed-interval overlap test: `[a_start, a_end]` meets `[b_start, b_end]`.
pub fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
  a_start <= b_end && b_start <= a_end
}

/// Render an instant for reports; sentinels print as open bounds.
pub fn format_instant(t: Instant) -> String {
  if t == BEGINNING_OF_TIME {
    return "-inf".to_string();
  }
  if t == END_OF_TIME {
    return "+inf".to_string();
  }
  t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Closed query window `[start, end]`; `start <= end` is enforced at construction.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Window {
  pub start: Instant,
  pub end: Instant,
}

impl Window {
  pub fn new(start: Instant, end: Instant) -> Result<Self> {
    if end < start {
      return Err(ReportError::MalformedWindow { start, end });
    }
    Ok(Self { start, end })
  }

  /// Build the inclusive window `[from 00:00:00.000, to 23:59:59.999]` in UTC.
  pub fn from_calendar_dates(from: &str, to: &str) -> Result<Self> {
    let start = parse_calendar_date(from, false)?;
    let end = parse_calendar_date(to, true)?;
    Self::new(start, end)
  }

  pub fn contains(&self, t: Instant) -> bool {
    self.start <= t && t <= self.end
  }
}
