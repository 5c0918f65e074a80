//! Canonical textual form for instants: `YYYY-MM-DD HH:MM:SS UT`.

use chrono::{DateTime, NaiveDateTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UT";

/// Format an instant in the canonical display form, truncating sub-second digits.
pub fn format_date(t: DateTime<Utc>) -> String {
    t.format(DATE_FORMAT).to_string()
}

/// Parse either RFC 3339 or the canonical `... UT` form.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub(crate) fn epoch_to_utc(epoch_s: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(epoch_s, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
