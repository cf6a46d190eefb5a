//! Deadline date parsing.
//!
//! CFP tables are hand edited, so the deadline column is free text.
//! Accepted forms:
//!
//! - RFC 3339 with an offset (`2025-05-01T23:59:00-07:00`)
//! - ISO date (`2025-05-01`), read as UTC midnight
//! - ISO date-time without offset (`2025-05-01T23:59`), read as local time
//! - `2025/05/01`, `05/01/2025`, `May 1, 2025`, `1 May 2025`, read as local
//!   midnight
//!
//! Anything else (`TBD`, `Rolling`, empty) yields `None`.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const LOCAL_DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

/// Parses a raw `cfp_ends` token into an instant.
pub fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return local_to_utc(naive);
        }
    }

    for format in LOCAL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0).and_then(local_to_utc);
        }
    }

    None
}

// Nonexistent local times (DST gaps) have no instant.
fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
