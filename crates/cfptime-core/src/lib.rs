//! Core types: CFP table parsing, deadline classification, filters, formatting

pub mod classifier;
pub mod date;
pub mod format;
pub mod parser;
pub mod partition;
pub mod record;
pub mod tracing;

pub use classifier::{
    DeadlineStatus, SOON_THRESHOLD_DAYS, URGENT_THRESHOLD_DAYS, UrgencyTier, classify,
    classify_days, days_until, days_until_deadline, deadline_status,
};
pub use date::parse_deadline;
pub use format::{
    FormatOptions, FormattedRow, JsonConference, JsonOutput, OutputFormat, OutputFormatter,
    ellipsis, make_hyperlink,
};
pub use parser::{TableParser, parse_document};
pub use partition::{LabelFilter, Partition, collect_labels, partition};
pub use record::ConferenceRecord;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
