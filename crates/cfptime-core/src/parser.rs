//! Extraction of the CFP table from a README.
//!
//! This is a line scanner, not a markdown parser. It looks for one table
//! shape: a header row starting with `| Conference` that also contains
//! `| CFP Ends`, followed by pipe-delimited data rows with at least five
//! cells:
//!
//! ```text
//! | Conference | CFP Ends | Conference Date | Location | Submit | Labels |
//! |---|---|---|---|---|---|
//! | [DEF CON](https://defcon.org) | 2025-05-01 | 2025-08-07 to 2025-08-10 | Las Vegas, NV | [Submit](https://cfp.defcon.org) | [US,COMMUNITY] |
//! ```
//!
//! Tables with other header tokens are skipped. Malformed rows are dropped,
//! never reported as errors. Only the first matching table is read.
//!
//! # Example
//!
//! ```
//! use cfptime_core::parser::parse_document;
//!
//! let readme = "\
//! | Conference | CFP Ends | Conference Date | Location | Submit |
//! |---|---|---|---|---|
//! | [DEF CON](https://defcon.org) | 2025-05-01 | Aug 2025 | Las Vegas | [Submit](https://cfp.defcon.org) |
//! ";
//! let records = parse_document(readme);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].name, "DEF CON");
//! assert_eq!(records[0].url, "https://defcon.org");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::date::parse_deadline;
use crate::record::ConferenceRecord;

/// Prefix of the header row that opens the table.
const HEADER_PREFIX: &str = "| Conference";

/// Column token the header row must also contain.
const HEADER_DEADLINE_COLUMN: &str = "| CFP Ends";

/// Marker of the header separator row.
const SEPARATOR_MARKER: &str = "---";

/// Name, deadline, conference date, location, submit link.
const MIN_CELLS: usize = 5;

/// First markdown link in a cell, non-greedy.
static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("Invalid link regex"));

/// First bracketed group in the labels cell.
static LABELS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").expect("Invalid labels regex"));

/// Scanner position relative to the CFP table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Looking for the header row.
    Searching,
    /// Header seen; the next line is the separator row.
    AfterHeader,
    /// Reading data rows.
    InTable,
    /// The table ended.
    Done,
}

/// Parser for the CFP table.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableParser;

impl TableParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Extracts the table rows, sorted by deadline.
    ///
    /// Never fails: a document without a matching table yields no records.
    /// Rows with equal deadlines keep their document order, and rows whose
    /// deadline cannot be parsed come after every dated row.
    pub fn parse(&self, document: &str) -> Vec<ConferenceRecord> {
        let mut records = Vec::new();
        let mut dropped = 0usize;
        let mut state = ScanState::Searching;

        for line in document.lines().map(str::trim) {
            if state == ScanState::Done {
                break;
            }
            if is_header(line) {
                state = ScanState::AfterHeader;
                continue;
            }

            match state {
                ScanState::Searching | ScanState::Done => {}
                ScanState::AfterHeader => state = ScanState::InTable,
                ScanState::InTable => {
                    if line.starts_with('|') {
                        if line.contains(SEPARATOR_MARKER) {
                            continue;
                        }
                        match parse_row(line) {
                            Some(record) => records.push(record),
                            None => dropped += 1,
                        }
                    } else if !line.is_empty() {
                        state = ScanState::Done;
                    }
                }
            }
        }

        sort_by_deadline(&mut records);
        debug!(rows = records.len(), dropped = dropped, "Parsed CFP table");
        records
    }
}

/// Convenience wrapper around [`TableParser::parse`].
pub fn parse_document(document: &str) -> Vec<ConferenceRecord> {
    TableParser::new().parse(document)
}

fn is_header(line: &str) -> bool {
    line.starts_with(HEADER_PREFIX) && line.contains(HEADER_DEADLINE_COLUMN)
}

fn parse_row(line: &str) -> Option<ConferenceRecord> {
    let cells: Vec<&str> = line
        .split('|')
        .filter(|cell| !cell.trim().is_empty())
        .collect();

    if cells.len() < MIN_CELLS {
        trace!(cells = cells.len(), row = %line, "Dropping short row");
        return None;
    }

    let (name, url) = split_link(cells[0]);
    if name.trim().is_empty() {
        trace!(row = %line, "Dropping row without a conference name");
        return None;
    }
    let (cfp_link_text, cfp_link_url) = split_link(cells[4]);
    let labels = cells.get(5).map(|cell| split_labels(cell)).unwrap_or_default();

    Some(ConferenceRecord {
        name,
        url,
        cfp_ends: cells[1].trim().to_string(),
        conference_date: cells[2].trim().to_string(),
        location: cells[3].trim().to_string(),
        cfp_link_text,
        cfp_link_url,
        labels,
    })
}

/// Splits `[text](url)` into its parts, or returns the trimmed cell and an
/// empty URL.
fn split_link(cell: &str) -> (String, String) {
    match LINK_REGEX.captures(cell) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (cell.trim().to_string(), String::new()),
    }
}

fn split_labels(cell: &str) -> Vec<String> {
    let Some(caps) = LABELS_REGEX.captures(cell) else {
        return Vec::new();
    };
    caps[1]
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Stable ascending sort; undated rows go last.
fn sort_by_deadline(records: &mut [ConferenceRecord]) {
    records.sort_by_cached_key(|record| {
        let deadline = parse_deadline(&record.cfp_ends);
        (deadline.is_none(), deadline)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "| Conference | CFP Ends | Conference Date | Location | Submit | Labels |\n|---|---|---|---|---|---|\n";

    fn table(rows: &[&str]) -> String {
        let mut doc = String::from("# Security CFPs\n\n");
        doc.push_str(HEADER);
        for row in rows {
            doc.push_str(row);
            doc.push('\n');
        }
        doc
    }

    fn names(records: &[ConferenceRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    mod detection {
        use super::*;

        #[test]
        fn empty_document() {
            assert!(parse_document("").is_empty());
        }

        #[test]
        fn document_without_table() {
            assert!(parse_document("# Title\n\nSome text\n- a list").is_empty());
        }

        #[test]
        fn other_tables_are_ignored() {
            let doc = "| Event | Deadline | Date | Place | Link |\n|---|---|---|---|---|\n| A | 2025-01-01 | x | y | z |\n";
            assert!(parse_document(doc).is_empty());
        }

        #[test]
        fn header_tokens_are_case_sensitive() {
            let doc = "| conference | cfp ends | Date | Place | Link |\n|---|---|---|---|---|\n| A | 2025-01-01 | x | y | z |\n";
            assert!(parse_document(doc).is_empty());
        }

        #[test]
        fn header_is_never_a_row() {
            let records = parse_document(&table(&["| A | 2025-01-01 | x | y | z |"]));
            assert_eq!(names(&records), vec!["A"]);
        }

        #[test]
        fn indented_table_is_detected() {
            let doc = "   | Conference | CFP Ends | Date | Place | Submit |\n   |---|---|---|---|---|\n   | A | 2025-01-01 | x | y | z |\n";
            assert_eq!(names(&parse_document(doc)), vec!["A"]);
        }

        #[test]
        fn separator_rows_are_skipped() {
            let records = parse_document(&table(&[
                "| A | 2025-01-01 | x | y | z |",
                "|-----|-----|-----|-----|-----|",
                "| B | 2025-01-02 | x | y | z |",
            ]));
            assert_eq!(names(&records), vec!["A", "B"]);
        }

        #[test]
        fn row_with_dashes_in_a_cell_is_skipped() {
            let records = parse_document(&table(&[
                "| A | 2025-01-01 | x | y | z |",
                "| B --- C | 2025-01-02 | x | y | z |",
            ]));
            assert_eq!(names(&records), vec!["A"]);
        }

        #[test]
        fn table_ends_at_first_non_pipe_line() {
            let mut doc = table(&["| A | 2025-01-01 | x | y | z |"]);
            doc.push_str("Footer text\n| B | 2025-01-02 | x | y | z |\n");
            assert_eq!(names(&parse_document(&doc)), vec!["A"]);
        }

        #[test]
        fn blank_lines_do_not_end_the_table() {
            let records = parse_document(&table(&[
                "| A | 2025-01-01 | x | y | z |",
                "",
                "| B | 2025-01-02 | x | y | z |",
            ]));
            assert_eq!(names(&records), vec!["A", "B"]);
        }

        #[test]
        fn second_table_is_not_read() {
            let mut doc = table(&["| A | 2025-01-01 | x | y | z |"]);
            doc.push_str("\nMore CFPs:\n\n");
            doc.push_str(HEADER);
            doc.push_str("| B | 2025-01-02 | x | y | z |\n");
            assert_eq!(names(&parse_document(&doc)), vec!["A"]);
        }

        #[test]
        fn crlf_line_endings() {
            let doc = table(&["| A | 2025-01-01 | x | y | z |"]).replace('\n', "\r\n");
            assert_eq!(names(&parse_document(&doc)), vec!["A"]);
        }
    }

    mod rows {
        use super::*;

        #[test]
        fn full_row() {
            let records = parse_document(&table(&[
                "| [DEF CON](https://defcon.org) | 2025-05-01 | 2025-08-07 to 2025-08-10 | Las Vegas, NV | [Submit](https://cfp.defcon.org) | [US,COMMUNITY] |",
            ]));
            assert_eq!(records.len(), 1);
            let record = &records[0];
            assert_eq!(record.name, "DEF CON");
            assert_eq!(record.url, "https://defcon.org");
            assert_eq!(record.cfp_ends, "2025-05-01");
            assert_eq!(record.conference_date, "2025-08-07 to 2025-08-10");
            assert_eq!(record.location, "Las Vegas, NV");
            assert_eq!(record.cfp_link_text, "Submit");
            assert_eq!(record.cfp_link_url, "https://cfp.defcon.org");
            assert_eq!(record.labels, vec!["US", "COMMUNITY"]);
        }

        #[test]
        fn plain_text_name() {
            let records = parse_document(&table(&["| BSides Nowhere | 2025-05-01 | May | Remote | Email us |"]));
            assert_eq!(records[0].name, "BSides Nowhere");
            assert_eq!(records[0].url, "");
            assert_eq!(records[0].cfp_link_text, "Email us");
            assert_eq!(records[0].cfp_link_url, "");
        }

        #[test]
        fn four_cells_dropped() {
            let records = parse_document(&table(&["| A | 2025-01-01 | x | y |"]));
            assert!(records.is_empty());
        }

        #[test]
        fn empty_cells_do_not_count() {
            let records = parse_document(&table(&["| A | 2025-01-01 |  | y | z |"]));
            assert!(records.is_empty());
        }

        #[test]
        fn five_cells_kept_without_labels() {
            let records = parse_document(&table(&["| A | 2025-01-01 | x | y | z |"]));
            assert_eq!(records.len(), 1);
            assert!(records[0].labels.is_empty());
        }

        #[test]
        fn first_link_only() {
            let records = parse_document(&table(&[
                "| [One](https://one.example) [Two](https://two.example) | 2025-01-01 | x | y | [Submit](https://a) [Mirror](https://b) |",
            ]));
            assert_eq!(records[0].name, "One");
            assert_eq!(records[0].url, "https://one.example");
            assert_eq!(records[0].cfp_link_text, "Submit");
            assert_eq!(records[0].cfp_link_url, "https://a");
        }

        #[test]
        fn link_with_empty_text_is_dropped() {
            let records = parse_document(&table(&["| [](https://x) | 2025-01-01 | x | y | z |"]));
            assert!(records.is_empty());
        }

        #[test]
        fn labels_trimmed() {
            let records = parse_document(&table(&["| A | 2025-01-01 | x | y | z | [US,EU, ASIA] |"]));
            assert_eq!(records[0].labels, vec!["US", "EU", "ASIA"]);
        }

        #[test]
        fn labels_without_brackets_ignored() {
            let records = parse_document(&table(&["| A | 2025-01-01 | x | y | z | US, EU |"]));
            assert!(records[0].labels.is_empty());
        }

        #[test]
        fn empty_label_entries_dropped() {
            let records = parse_document(&table(&["| A | 2025-01-01 | x | y | z | [US,,EU,] |"]));
            assert_eq!(records[0].labels, vec!["US", "EU"]);
        }

        #[test]
        fn missing_outer_pipes() {
            let records = parse_document(&table(&["| A | 2025-01-01 | x | y | z"]));
            assert_eq!(names(&records), vec!["A"]);
        }
    }

    mod ordering {
        use super::*;

        #[test]
        fn sorted_by_deadline() {
            let records = parse_document(&table(&[
                "| C | 2025-03-01 | x | y | z |",
                "| A | 2025-01-01 | x | y | z |",
                "| B | 2025-02-01 | x | y | z |",
            ]));
            assert_eq!(names(&records), vec!["A", "B", "C"]);
        }

        #[test]
        fn equal_deadlines_keep_row_order() {
            let records = parse_document(&table(&[
                "| Late | 2025-06-01 | x | y | z |",
                "| First | 2025-01-01 | x | y | z |",
                "| Second | 2025-01-01 | x | y | z |",
                "| Third | 2025-01-01 | x | y | z |",
            ]));
            assert_eq!(names(&records), vec!["First", "Second", "Third", "Late"]);
        }

        #[test]
        fn undated_rows_sort_last_in_row_order() {
            let records = parse_document(&table(&[
                "| Rolling | Rolling | x | y | z |",
                "| B | 2025-02-01 | x | y | z |",
                "| Unknown | TBD | x | y | z |",
                "| A | 2025-01-01 | x | y | z |",
            ]));
            assert_eq!(names(&records), vec!["A", "B", "Rolling", "Unknown"]);
        }

        #[test]
        fn output_is_non_decreasing() {
            let records = parse_document(&table(&[
                "| A | 2025-05-01T10:00:00Z | x | y | z |",
                "| B | 2025-05-01 | x | y | z |",
                "| C | 2024-12-31 | x | y | z |",
                "| D | 2025-05-01T09:00:00Z | x | y | z |",
            ]));
            let deadlines: Vec<_> = records.iter().map(|r| r.deadline().unwrap()).collect();
            assert!(deadlines.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(names(&records), vec!["C", "B", "D", "A"]);
        }
    }

    #[test]
    fn parser_struct_matches_free_function() {
        let doc = table(&["| A | 2025-01-01 | x | y | z |"]);
        assert_eq!(TableParser::new().parse(&doc), parse_document(&doc));
    }
}
