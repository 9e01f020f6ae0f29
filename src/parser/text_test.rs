// ABOUTME: Tests for the line parser and URL extraction.
// ABOUTME: Uses agent-style numbered lists with bold labels.

use serde_json::{Value, json};

use super::*;

#[test]
fn test_no_numbered_entries_yields_nothing() {
    let schema = Schema::timeline_event();
    assert!(parse("", &schema).is_empty());
    assert!(parse("**Year:** 1504\n**Title:** David", &schema).is_empty());
    assert!(parse("Here is what I found about the artist.", &schema).is_empty());
}

#[test]
fn test_single_entry_with_markdown_link() {
    let schema = Schema::timeline_event();
    let text = "1. **Year:** 1504\n**Title:** David\n**Description:** A statue.\n**Source:** see (https://example.com/page)";

    let records = parse(text, &schema);
    assert_eq!(records.len(), 1);

    let expected = json!({
        "date": "1504",
        "event_title": "David",
        "detailed_summary": "A statue.",
        "location_name": "",
        "latitude": null,
        "longitude": null,
        "source_url": "https://example.com/page"
    });
    assert_eq!(Value::from(records[0].clone()), expected);
    assert!(validate(&records, &schema).is_err());
}

#[test]
fn test_continuation_lines_join_with_space() {
    let schema = Schema::timeline_event();
    let records = parse("1. **Description:** Part one.\nPart two.", &schema);
    assert_eq!(records[0].get_str("detailed_summary"), Some("Part one. Part two."));
}

#[test]
fn test_blank_line_ends_continuation() {
    let schema = Schema::timeline_event();
    let text = "1. **Description:** Part one.\n\nStray commentary here.";
    let records = parse(text, &schema);
    assert_eq!(records[0].get_str("detailed_summary"), Some("Part one."));

    let text = "1. **Description:** Part one.\n   \nStray commentary here.";
    let records = parse(text, &schema);
    assert_eq!(records[0].get_str("detailed_summary"), Some("Part one."));
}

#[test]
fn test_unlabelled_line_before_any_field_is_dropped() {
    let schema = Schema::timeline_event();
    let records = parse("1. Michelangelo in Florence\nsome more words", &schema);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0], schema.new_record());
}

#[test]
fn test_multiple_entries_keep_order() {
    let schema = Schema::timeline_event();
    let text = "\
Here are the events:

1. **Year:** 1494
   **Event Title:** Medici expelled from Florence
   **Location:** Florence, Italy
2. **Year:** 1505
   **Event Title:** Summoned to Rome by Julius II
   **Location:** Rome, Italy
10. **Year:** 1534
   **Event Title:** Final move to Rome
";
    let records = parse(text, &schema);
    let titles: Vec<_> = records
        .iter()
        .map(|r| r.get_str("event_title").unwrap())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Medici expelled from Florence",
            "Summoned to Rome by Julius II",
            "Final move to Rome"
        ]
    );
    assert_eq!(records[1].get_str("location_name"), Some("Rome, Italy"));
    assert_eq!(records[2].get_str("date"), Some("1534"));
}

#[test]
fn test_label_without_bold_or_colon_markers() {
    let schema = Schema::timeline_event();
    let records = parse("1. Year: 1520\nTitle: Medici Chapel begun", &schema);
    assert_eq!(records[0].get_str("date"), Some("1520"));
    assert_eq!(records[0].get_str("event_title"), Some("Medici Chapel begun"));
}

#[test]
fn test_labelled_line_overwrites_field() {
    let schema = Schema::timeline_event();
    let records = parse("1. **Year:** 1504\n**Date:** 1505", &schema);
    assert_eq!(records[0].get_str("date"), Some("1505"));
}

#[test]
fn test_records_have_exactly_schema_keys() {
    let schema = Schema::artist_network();
    let text = "\
1. **Connected Entity Name:** Lorenzo de' Medici
   **Relationship Summary:** Early patron who housed the young sculptor.
   **Relationship Duration:** 1489-1492
   **Connection Score:** 9
   **Related Artwork:** Madonna of the Stairs
   **Source:** https://www.britannica.com/biography/Lorenzo-de-Medici
";
    let records = parse(text, &schema);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].len(), schema.fields().count());
    for field in schema.fields() {
        assert!(records[0].contains_key(field), "missing {field}");
    }
    assert_eq!(records[0].get("connection_score"), Some(&json!(9)));
    assert_eq!(
        records[0].get_str("related_artwork"),
        Some("Madonna of the Stairs")
    );
    assert_eq!(
        records[0].get_str("source_url"),
        Some("https://www.britannica.com/biography/Lorenzo-de-Medici")
    );
    assert!(validate(&records, &schema).is_ok());
}

#[test]
fn test_score_transform_clamps() {
    let schema = Schema::artist_network();
    let records = parse(
        "1. **Connection Score:** 15\n2. **Connection Score:** 0",
        &schema,
    );
    assert_eq!(records[0].get("connection_score"), Some(&json!(10)));
    assert_eq!(records[1].get("connection_score"), Some(&json!(1)));
}

#[test]
fn test_continuation_does_not_touch_numeric_field() {
    let schema = Schema::artist_network();
    let records = parse("1. **Connection Score:** 6\nvery close friends", &schema);
    assert_eq!(records[0].get("connection_score"), Some(&json!(6)));
}

#[test]
fn test_extract_url_variants() {
    assert_eq!(
        extract_url("see (https://example.com/page)"),
        "https://example.com/page"
    );
    assert_eq!(
        extract_url("[Britannica](https://www.britannica.com/art)"),
        "https://www.britannica.com/art"
    );
    assert_eq!(
        extract_url("https://en.wikipedia.org/wiki/David_(Michelangelo)"),
        "https://en.wikipedia.org/wiki/David_(Michelangelo)"
    );
    assert_eq!(extract_url("www.khanacademy.org"), "www.khanacademy.org");
    assert_eq!(extract_url("  Vasari, Lives of the Artists  "), "Vasari, Lives of the Artists");
}
