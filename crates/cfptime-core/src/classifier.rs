//! Deadline urgency classification.
//!
//! [`classify`] maps a raw deadline and a reference instant to an
//! [`UrgencyTier`]. The day count is `ceil((deadline - now) / 1 day)` on the
//! raw instants, without normalizing either side to midnight, so a deadline
//! at `00:00` seen at `12:00` the same day counts as day 0.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::parse_deadline;

/// Deadlines at most this many days away are urgent.
pub const URGENT_THRESHOLD_DAYS: i64 = 10;

/// Deadlines at most this many days away are soon.
pub const SOON_THRESHOLD_DAYS: i64 = 40;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// How close a CFP deadline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    /// The deadline has passed.
    Expired,
    /// Closes today.
    Today,
    /// Closes tomorrow.
    Tomorrow,
    /// Closes within 10 days.
    Urgent,
    /// Closes within 40 days.
    Soon,
    /// Closes later, or the deadline is unknown.
    Normal,
}

impl UrgencyTier {
    /// Returns the style class name for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Urgent => "urgent",
            Self::Soon => "soon",
            Self::Normal => "normal",
        }
    }

    /// Returns true unless the deadline has passed.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Expired)
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole days until `deadline`, rounded up.
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (deadline - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// Whole days until a raw deadline, `None` when it does not parse.
pub fn days_until_deadline(cfp_ends: &str, now: DateTime<Utc>) -> Option<i64> {
    parse_deadline(cfp_ends).map(|deadline| days_until(deadline, now))
}

/// Applies the tier table to a day count. First match wins.
pub fn classify_days(days: i64) -> UrgencyTier {
    if days < 0 {
        UrgencyTier::Expired
    } else if days == 0 {
        UrgencyTier::Today
    } else if days == 1 {
        UrgencyTier::Tomorrow
    } else if days <= URGENT_THRESHOLD_DAYS {
        UrgencyTier::Urgent
    } else if days <= SOON_THRESHOLD_DAYS {
        UrgencyTier::Soon
    } else {
        UrgencyTier::Normal
    }
}

/// Classifies a raw deadline relative to `now`.
///
/// A deadline that does not parse has no day count; it fails every
/// threshold and lands in [`UrgencyTier::Normal`], so it stays active.
pub fn classify(cfp_ends: &str, now: DateTime<Utc>) -> UrgencyTier {
    days_until_deadline(cfp_ends, now)
        .map(classify_days)
        .unwrap_or(UrgencyTier::Normal)
}

/// Tier plus day count, as shown in the status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineStatus {
    /// The urgency tier.
    pub tier: UrgencyTier,
    /// Days until the deadline, `None` when it does not parse.
    pub days_until: Option<i64>,
}

impl DeadlineStatus {
    /// Computes the status of a raw deadline.
    pub fn for_deadline(cfp_ends: &str, now: DateTime<Utc>) -> Self {
        let days_until = days_until_deadline(cfp_ends, now);
        let tier = days_until
            .map(classify_days)
            .unwrap_or(UrgencyTier::Normal);
        Self { tier, days_until }
    }

    /// Badge text: `EXPIRED`, `TODAY`, `TOMORROW`, `N DAYS` or `TBD`.
    pub fn text(&self) -> String {
        match (self.tier, self.days_until) {
            (UrgencyTier::Expired, _) => "EXPIRED".to_string(),
            (UrgencyTier::Today, _) => "TODAY".to_string(),
            (UrgencyTier::Tomorrow, _) => "TOMORROW".to_string(),
            (_, Some(days)) => format!("{} DAYS", days),
            (_, None) => "TBD".to_string(),
        }
    }
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Shorthand for [`DeadlineStatus::for_deadline`].
pub fn deadline_status(cfp_ends: &str, now: DateTime<Utc>) -> DeadlineStatus {
    DeadlineStatus::for_deadline(cfp_ends, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    mod day_count {
        use super::*;

        #[test]
        fn rounds_up_partial_days() {
            let now = utc(2025, 5, 1, 12, 0, 0);
            assert_eq!(days_until(now + Duration::hours(1), now), 1);
            assert_eq!(days_until(now + Duration::hours(36), now), 2);
            assert_eq!(days_until(now - Duration::hours(12), now), 0);
            assert_eq!(days_until(now - Duration::hours(36), now), -1);
        }

        #[test]
        fn exact_days() {
            let now = utc(2025, 5, 1, 12, 0, 0);
            assert_eq!(days_until(now, now), 0);
            assert_eq!(days_until(now + Duration::days(10), now), 10);
            assert_eq!(days_until(now - Duration::days(1), now), -1);
        }

        #[test]
        fn millisecond_past_deadline_is_today() {
            let now = utc(2025, 5, 1, 0, 0, 0);
            assert_eq!(days_until(now - Duration::milliseconds(1), now), 0);
            assert_eq!(days_until(now + Duration::milliseconds(1), now), 1);
        }

        #[test]
        fn midnight_deadline_seen_later_that_day() {
            let now = utc(2025, 5, 1, 18, 0, 0);
            assert_eq!(days_until_deadline("2025-05-01", now), Some(0));
            assert_eq!(days_until_deadline("2025-04-30", now), Some(-1));
            assert_eq!(days_until_deadline("2025-05-02", now), Some(1));
        }

        #[test]
        fn unparseable_has_no_count() {
            assert_eq!(days_until_deadline("TBD", utc(2025, 5, 1, 0, 0, 0)), None);
        }
    }

    mod tiers {
        use super::*;

        #[test]
        fn tie_table() {
            assert_eq!(classify_days(-30), UrgencyTier::Expired);
            assert_eq!(classify_days(-1), UrgencyTier::Expired);
            assert_eq!(classify_days(0), UrgencyTier::Today);
            assert_eq!(classify_days(1), UrgencyTier::Tomorrow);
            assert_eq!(classify_days(2), UrgencyTier::Urgent);
            assert_eq!(classify_days(10), UrgencyTier::Urgent);
            assert_eq!(classify_days(11), UrgencyTier::Soon);
            assert_eq!(classify_days(40), UrgencyTier::Soon);
            assert_eq!(classify_days(41), UrgencyTier::Normal);
            assert_eq!(classify_days(365), UrgencyTier::Normal);
        }

        #[test]
        fn classify_raw_deadlines() {
            let now = utc(2025, 5, 1, 12, 0, 0);
            assert_eq!(classify("2025-04-30", now), UrgencyTier::Expired);
            assert_eq!(classify("2025-05-01", now), UrgencyTier::Today);
            assert_eq!(classify("2025-05-02", now), UrgencyTier::Tomorrow);
            assert_eq!(classify("2025-05-11", now), UrgencyTier::Urgent);
            assert_eq!(classify("2025-05-12", now), UrgencyTier::Soon);
            assert_eq!(classify("2025-06-10", now), UrgencyTier::Soon);
            assert_eq!(classify("2025-06-11", now), UrgencyTier::Normal);
        }

        #[test]
        fn unparseable_is_normal_and_active() {
            let tier = classify("Rolling", utc(2025, 5, 1, 12, 0, 0));
            assert_eq!(tier, UrgencyTier::Normal);
            assert!(tier.is_active());
        }

        #[test]
        fn only_expired_is_inactive() {
            assert!(!UrgencyTier::Expired.is_active());
            assert!(UrgencyTier::Today.is_active());
            assert!(UrgencyTier::Normal.is_active());
        }

        #[test]
        fn class_names() {
            assert_eq!(UrgencyTier::Expired.as_str(), "expired");
            assert_eq!(UrgencyTier::Tomorrow.to_string(), "tomorrow");
            assert_eq!(
                serde_json::to_string(&UrgencyTier::Urgent).unwrap(),
                "\"urgent\""
            );
        }
    }

    mod status {
        use super::*;

        #[test]
        fn badge_text() {
            let now = utc(2025, 5, 1, 12, 0, 0);
            assert_eq!(deadline_status("2025-04-01", now).text(), "EXPIRED");
            assert_eq!(deadline_status("2025-05-01", now).text(), "TODAY");
            assert_eq!(deadline_status("2025-05-02", now).text(), "TOMORROW");
            assert_eq!(deadline_status("2025-05-06", now).text(), "5 DAYS");
            assert_eq!(deadline_status("2025-08-01", now).to_string(), "92 DAYS");
            assert_eq!(deadline_status("TBD", now).text(), "TBD");
        }

        #[test]
        fn status_matches_classify() {
            let now = utc(2025, 5, 1, 12, 0, 0);
            for token in ["2025-04-30", "2025-05-01", "2025-05-20", "2026-01-01", "TBD"] {
                assert_eq!(deadline_status(token, now).tier, classify(token, now));
            }
        }
    }
}
