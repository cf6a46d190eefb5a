//! Conference records extracted from the CFP table.
//!
//! A [`ConferenceRecord`] keeps every cell exactly as it was found in the
//! source document. Nothing is validated beyond the cell count check done by
//! the parser; in particular `cfp_ends` is kept as raw text and only
//! interpreted when sorting or classifying.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::parse_deadline;

/// One data row of the CFP table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceRecord {
    /// Conference name (link text when the cell holds a markdown link).
    pub name: String,
    /// Conference homepage, empty when column 1 has no link.
    pub url: String,
    /// Raw CFP deadline token.
    pub cfp_ends: String,
    /// Raw conference date text, may be a range.
    pub conference_date: String,
    /// Raw location text.
    pub location: String,
    /// Label of the submission link, or the raw cell text.
    pub cfp_link_text: String,
    /// Submission URL, empty when absent.
    pub cfp_link_url: String,
    /// Tags declared in the optional labels column.
    pub labels: Vec<String>,
}

impl ConferenceRecord {
    /// Creates a record with a name and deadline; every other field is empty.
    pub fn new(name: impl Into<String>, cfp_ends: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: String::new(),
            cfp_ends: cfp_ends.into(),
            conference_date: String::new(),
            location: String::new(),
            cfp_link_text: String::new(),
            cfp_link_url: String::new(),
            labels: Vec::new(),
        }
    }

    /// Builder: set the conference homepage.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder: set the conference date text.
    pub fn with_conference_date(mut self, date: impl Into<String>) -> Self {
        self.conference_date = date.into();
        self
    }

    /// Builder: set the location text.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder: set the submission link label and URL.
    pub fn with_cfp_link(mut self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.cfp_link_text = text.into();
        self.cfp_link_url = url.into();
        self
    }

    /// Builder: set the labels.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Parses the deadline, `None` when the token is not a recognised date.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        parse_deadline(&self.cfp_ends)
    }

    /// Returns true if the conference name carries a link.
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    /// Returns true if the submit cell carries a link.
    pub fn has_cfp_link(&self) -> bool {
        !self.cfp_link_url.is_empty()
    }

    /// Case-insensitive label lookup.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.eq_ignore_ascii_case(label))
    }
}
