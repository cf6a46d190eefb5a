//! Active/expired partitioning and label filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::classify;
use crate::record::ConferenceRecord;

/// Records split by whether their deadline has passed.
///
/// Both halves keep the order they were given in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    /// Records whose tier is not expired.
    pub active: Vec<&'a ConferenceRecord>,
    /// Records whose deadline has passed.
    pub expired: Vec<&'a ConferenceRecord>,
}

impl<'a> Partition<'a> {
    /// Number of active records.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of expired records.
    pub fn expired_count(&self) -> usize {
        self.expired.len()
    }

    /// Records to display: active first, then expired when requested.
    pub fn displayed(&self, show_expired: bool) -> Vec<&'a ConferenceRecord> {
        let mut out = self.active.clone();
        if show_expired {
            out.extend(self.expired.iter().copied());
        }
        out
    }
}

/// Splits records into active and expired relative to `now`.
pub fn partition<'a, I>(records: I, now: DateTime<Utc>) -> Partition<'a>
where
    I: IntoIterator<Item = &'a ConferenceRecord>,
{
    let (active, expired) = records
        .into_iter()
        .partition(|record| classify(&record.cfp_ends, now).is_active());
    Partition { active, expired }
}

/// Keeps records carrying the given labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelFilter {
    /// Labels to look for, compared case-insensitively.
    pub labels: Vec<String>,
    /// Require every label instead of any of them.
    pub match_all: bool,
}

impl LabelFilter {
    /// A filter matching records with any of `labels`.
    pub fn any<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            match_all: false,
        }
    }

    /// A filter matching records with all of `labels`.
    pub fn all<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            match_all: true,
            ..Self::any(labels)
        }
    }

    /// Returns true if the filter keeps everything.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns true if `record` passes the filter.
    pub fn matches(&self, record: &ConferenceRecord) -> bool {
        if self.is_empty() {
            return true;
        }
        if self.match_all {
            self.labels.iter().all(|label| record.has_label(label))
        } else {
            self.labels.iter().any(|label| record.has_label(label))
        }
    }

    /// Filters a record slice, keeping order.
    pub fn apply<'a>(&self, records: &'a [ConferenceRecord]) -> Vec<&'a ConferenceRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Distinct labels in first-seen order, compared case-insensitively.
pub fn collect_labels(records: &[ConferenceRecord]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for label in records.iter().flat_map(|record| record.labels.iter()) {
        if !labels.iter().any(|seen| seen.eq_ignore_ascii_case(label)) {
            labels.push(label.clone());
        }
    }
    labels
}
