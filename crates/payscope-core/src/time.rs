//! RFC 3339 time helpers.
//!
//! The store speaks RFC 3339 strings for every timestamp parameter; this
//! module wraps the `time` crate so the rest of the workspace never touches
//! format descriptions directly.

use std::fmt;
use time::{Duration, OffsetDateTime};

/// Current UTC time.
#[must_use]
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// `now` minus a whole number of hours. Used for look-back windows such as
/// "logs from the last 24 hours".
#[must_use]
pub fn hours_before(now: OffsetDateTime, hours: i64) -> OffsetDateTime {
    now - Duration::hours(hours)
}

/// `now` minus a whole number of days.
#[must_use]
pub fn days_before(now: OffsetDateTime, days: i64) -> OffsetDateTime {
    now - Duration::days(days)
}

/// Display wrapper rendering a timestamp as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rfc3339(pub OffsetDateTime);

impl fmt::Display for Rfc3339 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .0
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}
