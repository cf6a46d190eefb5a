//! Golden tests for board rendering.
//!
//! Snapshots are inline; run `cargo insta review` after intentional changes.

use chrono::{DateTime, TimeZone, Utc};

use crate::format::{FormatOptions, OutputFormatter, format_error};
use crate::parser::parse_document;
use crate::record::ConferenceRecord;

const README: &str = "\
# Upcoming CFPs

Some intro text.

| Conference | CFP Ends | Conference Date | Location | CFP Link | Labels |
|---|---|---|---|---|---|
| [KubeCon EU](https://kubecon.example) | 2025-06-01 | Nov 2025 | London, UK | [CFP](https://kubecon.example/cfp) | [EU,CLOUD] |
| [Old Conf](https://old.example) | 2025-04-01 | Mar 2025 | Paris | [Closed](https://old.example/cfp) | [EU] |
| Community Day | TBD | Fall | Berlin | Soon |
| [DEF CON 33](https://defcon.org) | 2025-05-06 | Aug 7-10, 2025 | Las Vegas | [Submit](https://cfp.defcon.org) | [US] |
| BSides Remote | 2025-05-01 | Jun 1 | Online | Email |

## Past events
";

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
}

fn records() -> Vec<ConferenceRecord> {
    parse_document(README)
}

#[test]
fn golden_tty_board() {
    let formatter = OutputFormatter::new(FormatOptions::plain());
    let output = formatter.render_table_at(&records(), reference_time());

    insta::assert_snapshot!(output, @r"
    CONFERENCE     CFP DEADLINE  STATUS   CONFERENCE DATE  LOCATION    SUBMIT
    -------------  ------------  -------  ---------------  ----------  --------
    BSides Remote  2025-05-01    TODAY    Jun 1            Online      Email
    DEF CON 33     2025-05-06    5 DAYS   Aug 7-10, 2025   Las Vegas   [Submit]
    KubeCon EU     2025-06-01    31 DAYS  Nov 2025         London, UK  [CFP]
    Community Day  TBD           TBD      Fall             Berlin      Soon

    $ SHOW 1 CLOSED CFP
    ");
}

#[test]
fn golden_tty_board_with_expired() {
    let formatter = OutputFormatter::new(FormatOptions::plain().with_show_expired(true));
    let output = formatter.render_table_at(&records(), reference_time());

    insta::assert_snapshot!(output, @r"
    CONFERENCE     CFP DEADLINE  STATUS   CONFERENCE DATE  LOCATION    SUBMIT
    -------------  ------------  -------  ---------------  ----------  --------
    BSides Remote  2025-05-01    TODAY    Jun 1            Online      Email
    DEF CON 33     2025-05-06    5 DAYS   Aug 7-10, 2025   Las Vegas   [Submit]
    KubeCon EU     2025-06-01    31 DAYS  Nov 2025         London, UK  [CFP]
    Community Day  TBD           TBD      Fall             Berlin      Soon
    Old Conf       2025-04-01    EXPIRED  Mar 2025         Paris       [Closed]
    ");
}

#[test]
fn golden_tty_empty() {
    let formatter = OutputFormatter::new(FormatOptions::plain());
    let output = formatter.render_table_at(&[], reference_time());

    insta::assert_snapshot!(output, @r"
    CONFERENCE  CFP DEADLINE  STATUS  CONFERENCE DATE  LOCATION  SUBMIT
    ----------  ------------  ------  ---------------  --------  ------
    ");
}

#[test]
fn golden_tty_hyperlinks_keep_alignment() {
    let now = reference_time();
    let plain = OutputFormatter::new(FormatOptions::plain()).render_table_at(&records(), now);
    let linked = OutputFormatter::new(FormatOptions {
        color: false,
        ..FormatOptions::default()
    })
    .render_table_at(&records(), now);

    let strip = |s: &str| {
        let re = regex::Regex::new(r"\x1b\]8;;[^\x1b]*\x1b\\").unwrap();
        re.replace_all(s, "").into_owned()
    };
    assert!(linked.contains("\x1b]8;;https://defcon.org\x1b\\DEF CON 33"));
    assert_eq!(strip(&linked), plain);
}

#[test]
fn golden_error_line() {
    insta::assert_snapshot!(format_error("Failed to fetch README"), @"[ERROR] Failed to fetch README");
}

#[test]
fn golden_summary_line() {
    let formatter = OutputFormatter::with_defaults();
    let records = records();
    let json = formatter.format_json_at(&records, reference_time(), None);
    let summary = formatter.format_summary_in(
        json.active_count,
        json.expired_count,
        Some(reference_time()),
        &Utc,
    );

    insta::assert_snapshot!(summary, @"[SYSTEM] TRACKING 4 ACTIVE / 1 CLOSED | LAST SYNC: 12:00:00");
}

#[test]
fn golden_json_single() {
    let formatter = OutputFormatter::with_defaults();
    let records: Vec<_> = records()
        .into_iter()
        .filter(|r| r.name == "DEF CON 33")
        .collect();
    let output = formatter.format_json_at(&records, reference_time(), Some(reference_time()));

    insta::assert_json_snapshot!(output, @r#"
    {
      "conferences": [
        {
          "name": "DEF CON 33",
          "url": "https://defcon.org",
          "cfp_ends": "2025-05-06",
          "conference_date": "Aug 7-10, 2025",
          "location": "Las Vegas",
          "cfp_link_text": "Submit",
          "cfp_link_url": "https://cfp.defcon.org",
          "labels": [
            "US"
          ],
          "status": "5 DAYS",
          "urgency": "urgent",
          "days_until": 5
        }
      ],
      "active_count": 1,
      "expired_count": 0,
      "last_sync": "2025-05-01T12:00:00+00:00"
    }
    "#);
}

#[test]
fn golden_json_lists_expired_last() {
    let formatter = OutputFormatter::with_defaults();
    let output = formatter.format_json_at(&records(), reference_time(), None);

    let names: Vec<_> = output.conferences.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        ["BSides Remote", "DEF CON 33", "KubeCon EU", "Community Day", "Old Conf"]
    );
    assert_eq!(output.active_count, 4);
    assert_eq!(output.expired_count, 1);
    assert!(output.last_sync.is_none());
    assert_eq!(output.conferences[3].days_until, None);
    assert_eq!(output.conferences[3].status, "TBD");
    assert_eq!(output.conferences[4].status, "EXPIRED");
}
