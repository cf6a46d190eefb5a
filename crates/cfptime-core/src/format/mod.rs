//! Output formatting for the CFP board.
//!
//! This module renders classified records in two shapes:
//! - **TTY**: an aligned table with a status column, OSC8 hyperlinks and
//!   optional ANSI colors per urgency tier
//! - **JSON**: machine-readable output including tier and day count
//!
//! Rendering is always done against an explicit `now`; the `*_at` variants
//! exist so tests can pin the clock.
//!
//! # Example
//!
//! ```rust
//! use cfptime_core::format::{FormatOptions, OutputFormatter};
//! use cfptime_core::ConferenceRecord;
//!
//! let records = vec![ConferenceRecord::new("DEF CON", "2999-05-01")];
//! let formatter = OutputFormatter::new(FormatOptions::plain());
//! let table = formatter.render_table(&records);
//! assert!(table.contains("DEF CON"));
//! ```

use std::borrow::Cow;
use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::{DeadlineStatus, UrgencyTier};
use crate::partition::partition;
use crate::record::ConferenceRecord;

#[cfg(test)]
mod golden_tests;

const COLUMN_GAP: &str = "  ";

const HEADERS: [&str; 6] = [
    "CONFERENCE",
    "CFP DEADLINE",
    "STATUS",
    "CONFERENCE DATE",
    "LOCATION",
    "SUBMIT",
];

const ANSI_RESET: &str = "\x1b[0m";

/// The output format for the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal table.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Whether to emit OSC8 hyperlinks for names and submit links.
    pub hyperlinks: bool,
    /// Whether to color rows by urgency tier.
    pub color: bool,
    /// Whether expired CFPs are listed after the active ones.
    pub show_expired: bool,
    /// Maximum length for conference names (truncated with ellipsis).
    pub max_name_length: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            hyperlinks: true,
            color: true,
            show_expired: false,
            max_name_length: None,
        }
    }
}

impl FormatOptions {
    /// Options without escape sequences, for pipes and tests.
    pub fn plain() -> Self {
        Self {
            hyperlinks: false,
            color: false,
            ..Self::default()
        }
    }

    /// Builder: list expired CFPs.
    pub fn with_show_expired(mut self, show: bool) -> Self {
        self.show_expired = show;
        self
    }

    /// Builder: truncate long names.
    pub fn with_max_name_length(mut self, max: Option<usize>) -> Self {
        self.max_name_length = max;
        self
    }
}

/// A formatted table row with metadata.
#[derive(Debug, Clone)]
pub struct FormattedRow {
    /// Visible cell text, one entry per column.
    pub cells: [String; 6],
    /// Deadline status of the record.
    pub status: DeadlineStatus,
    /// The underlying record.
    pub record: ConferenceRecord,
}

/// JSON output format for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Active records followed by expired ones.
    pub conferences: Vec<JsonConference>,
    /// Number of records still open.
    pub active_count: usize,
    /// Number of records past their deadline.
    pub expired_count: usize,
    /// Time of the last successful sync (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
}

/// A single conference in JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonConference {
    pub name: String,
    pub url: String,
    pub cfp_ends: String,
    pub conference_date: String,
    pub location: String,
    pub cfp_link_text: String,
    pub cfp_link_url: String,
    pub labels: Vec<String>,
    /// Badge text (`TODAY`, `5 DAYS`, ...).
    pub status: String,
    /// Urgency tier.
    pub urgency: UrgencyTier,
    /// Days until the deadline, absent when it does not parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until: Option<i64>,
}

/// Output formatter for CFP records.
#[derive(Debug, Clone, Default)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    /// Creates a new OutputFormatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Creates a new OutputFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(FormatOptions::default())
    }

    /// Returns the formatting options.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats the given records as rows, in order.
    pub fn format_rows_at(
        &self,
        records: &[&ConferenceRecord],
        now: DateTime<Utc>,
    ) -> Vec<FormattedRow> {
        records
            .iter()
            .map(|record| self.format_row(record, now))
            .collect()
    }

    /// Renders the board table.
    pub fn render_table(&self, records: &[ConferenceRecord]) -> String {
        self.render_table_at(records, Utc::now())
    }

    /// Renders the board table at a specific time.
    ///
    /// Active records come first in deadline order, then expired ones when
    /// `show_expired` is set; otherwise a hint line counts the hidden ones.
    pub fn render_table_at(&self, records: &[ConferenceRecord], now: DateTime<Utc>) -> String {
        let split = partition(records, now);
        let displayed = split.displayed(self.options.show_expired);
        let rows = self.format_rows_at(&displayed, now);

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.cells.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(rows.len() + 3);
        lines.push(join_cells(HEADERS.map(Cow::Borrowed), &HEADERS.map(Some), &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP),
        );

        for row in &rows {
            let decorated = self.decorate_cells(row);
            let plain = row.cells.each_ref().map(|c| Some(c.as_str()));
            let line = join_cells(decorated, &plain, &widths);
            if self.options.color {
                lines.push(format!("{}{}{}", tier_color(row.status.tier), line, ANSI_RESET));
            } else {
                lines.push(line);
            }
        }

        let hidden = split.expired_count();
        if hidden > 0 && !self.options.show_expired {
            lines.push(String::new());
            lines.push(expired_hint(hidden));
        }

        lines.join("\n")
    }

    /// Formats the status line shown above the table, in local time.
    pub fn format_summary(
        &self,
        active: usize,
        expired: usize,
        last_sync: Option<DateTime<Utc>>,
    ) -> String {
        self.format_summary_in(active, expired, last_sync, &Local)
    }

    /// Formats the status line with the sync time in `tz`.
    pub fn format_summary_in<Tz>(
        &self,
        active: usize,
        expired: usize,
        last_sync: Option<DateTime<Utc>>,
        tz: &Tz,
    ) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut line = format!("[SYSTEM] TRACKING {} ACTIVE / {} CLOSED", active, expired);
        if let Some(at) = last_sync {
            line.push_str(&format!(
                " | LAST SYNC: {}",
                at.with_timezone(tz).format("%H:%M:%S")
            ));
        }
        line
    }

    /// Formats the board as JSON output at a specific time.
    pub fn format_json_at(
        &self,
        records: &[ConferenceRecord],
        now: DateTime<Utc>,
        last_sync: Option<DateTime<Utc>>,
    ) -> JsonOutput {
        let split = partition(records, now);
        let conferences = split
            .displayed(true)
            .into_iter()
            .map(|record| to_json_conference(record, now))
            .collect();

        JsonOutput {
            conferences,
            active_count: split.active_count(),
            expired_count: split.expired_count(),
            last_sync: last_sync.map(|at| at.to_rfc3339()),
        }
    }

    fn format_row(&self, record: &ConferenceRecord, now: DateTime<Utc>) -> FormattedRow {
        let status = DeadlineStatus::for_deadline(&record.cfp_ends, now);
        let submit = if record.has_cfp_link() {
            format!("[{}]", record.cfp_link_text)
        } else {
            record.cfp_link_text.clone()
        };

        FormattedRow {
            cells: [
                self.truncate_name(&record.name).into_owned(),
                record.cfp_ends.clone(),
                status.text(),
                record.conference_date.clone(),
                record.location.clone(),
                submit,
            ],
            status,
            record: record.clone(),
        }
    }

    /// Wraps the name and submit cells in hyperlinks when enabled.
    fn decorate_cells<'a>(&self, row: &'a FormattedRow) -> [Cow<'a, str>; 6] {
        let mut cells = row.cells.each_ref().map(|c| Cow::Borrowed(c.as_str()));
        if self.options.hyperlinks {
            if row.record.has_url() {
                cells[0] = Cow::Owned(make_hyperlink(&row.record.url, &row.cells[0]));
            }
            if row.record.has_cfp_link() {
                cells[5] = Cow::Owned(make_hyperlink(&row.record.cfp_link_url, &row.cells[5]));
            }
        }
        cells
    }

    fn truncate_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self.options.max_name_length {
            Some(max_len) => ellipsis(name, max_len),
            None => Cow::Borrowed(name),
        }
    }
}

/// `[ERROR] message`, shown instead of the table when a fetch failed.
pub fn format_error(message: &str) -> String {
    format!("[ERROR] {}", message)
}

/// Placeholder shown before the first cycle completes.
pub fn format_loading() -> &'static str {
    "LOADING DATABASE..."
}

/// `$ SHOW n CLOSED CFP(S)`.
fn expired_hint(count: usize) -> String {
    format!(
        "$ SHOW {} CLOSED CFP{}",
        count,
        if count > 1 { "S" } else { "" }
    )
}

/// Pads every column but the last to its width, measuring the plain text.
fn join_cells(cells: [Cow<'_, str>; 6], plain: &[Option<&str>; 6], widths: &[usize; 6]) -> String {
    let last = cells.len() - 1;
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        line.push_str(cell);
        if i < last {
            let visible = plain[i].map_or(0, |p| p.chars().count());
            line.push_str(&" ".repeat(widths[i].saturating_sub(visible)));
            line.push_str(COLUMN_GAP);
        }
    }
    line
}

fn tier_color(tier: UrgencyTier) -> &'static str {
    match tier {
        UrgencyTier::Expired => "\x1b[2m",
        UrgencyTier::Today => "\x1b[1;31m",
        UrgencyTier::Tomorrow => "\x1b[31m",
        UrgencyTier::Urgent => "\x1b[33m",
        UrgencyTier::Soon => "\x1b[36m",
        UrgencyTier::Normal => "\x1b[32m",
    }
}

fn to_json_conference(record: &ConferenceRecord, now: DateTime<Utc>) -> JsonConference {
    let status = DeadlineStatus::for_deadline(&record.cfp_ends, now);
    JsonConference {
        name: record.name.clone(),
        url: record.url.clone(),
        cfp_ends: record.cfp_ends.clone(),
        conference_date: record.conference_date.clone(),
        location: record.location.clone(),
        cfp_link_text: record.cfp_link_text.clone(),
        cfp_link_url: record.cfp_link_url.clone(),
        labels: record.labels.clone(),
        status: status.text(),
        urgency: status.tier,
        days_until: status.days_until,
    }
}

/// Truncates a string with ellipsis if it exceeds the given length.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}

/// Creates an OSC8 hyperlink for terminal output.
pub fn make_hyperlink(url: &str, label: &str) -> String {
    // OSC8 hyperlink format: \e]8;;URL\e\\LABEL\e]8;;\e\\
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, label)
}
