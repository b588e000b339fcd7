use rtimebook::db::EntryFilter;
use rtimebook::models::EntryMeta;
use rtimebook::models::entry::{is_billable, ticket_number};
use rtimebook::utils::table::render;
use rtimebook::utils::time::{hms, parse_date_time, parse_offset, timedelta};
use rtimebook::utils::{Completion, complete};
use rusqlite::types::Value;

mod common;
use common::at;

#[test]
fn test_complete_exact_prefix_and_ambiguous() {
    let names = ["display", "in", "insert", "stats", "switch"];

    assert_eq!(complete(names, "in"), Completion::Found("in"));
    assert_eq!(complete(names, "ins"), Completion::Found("insert"));
    assert_eq!(complete(names, "d"), Completion::Found("display"));
    assert_eq!(
        complete(names, "s"),
        Completion::Ambiguous(vec!["stats".into(), "switch".into()])
    );
    assert_eq!(complete(names, "x"), Completion::NoMatch);
}

#[test]
fn test_parse_offsets() {
    assert_eq!(parse_offset("20m"), Some(1200));
    assert_eq!(parse_offset("1h 20m ago"), Some(4800));
    assert_eq!(parse_offset("1d2h"), Some(93_600));
    assert_eq!(parse_offset("30s ago"), Some(30));
    assert_eq!(parse_offset("ago"), None);
    assert_eq!(parse_offset("2013-05-01"), None);
}

#[test]
fn test_parse_date_time_formats() {
    let now = at("2013-05-01 15:00");

    assert_eq!(parse_date_time("09:30", now).unwrap(), at("2013-05-01 09:30"));
    assert_eq!(parse_date_time("09:30:00", now).unwrap(), at("2013-05-01 09:30"));
    assert_eq!(parse_date_time("2013-04-30", now).unwrap(), at("2013-04-30 00:00"));
    assert_eq!(parse_date_time("2013-04-30 18:05", now).unwrap(), at("2013-04-30 18:05"));
    assert_eq!(
        parse_date_time("2013-04-30 18:05:00", now).unwrap(),
        at("2013-04-30 18:05")
    );
    assert!(parse_date_time("yesterday", now).is_err());
}

#[test]
fn test_duration_formats() {
    assert_eq!(hms(0), "00:00:00");
    assert_eq!(hms(3_723), "01:02:03");
    assert_eq!(hms(90_000), "25:00:00");
    assert_eq!(timedelta(3_723), "1:02:03");
    assert_eq!(timedelta(90_000), "1 day, 1:00:00");
    assert_eq!(timedelta(180_000), "2 days, 2:00:00");
}

#[test]
fn test_table_render_pads_columns_and_ignores_footer_width() {
    let rows = vec![
        vec!["A".to_string(), "Bee".to_string(), "C".to_string()],
        vec!["long".to_string(), "".to_string(), "x".to_string()],
        vec!["a much longer footer".to_string(), "y".to_string(), "".to_string()],
    ];

    let out = render(&rows, true);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "A      Bee   C");
    assert_eq!(lines[1], "long         x");
    assert_eq!(lines[2], "a much longer footery");

    let out = render(&rows, false);
    assert!(out.lines().next().unwrap().starts_with("A                      Bee"));
}

#[test]
fn test_entry_filter_composes_parameters() {
    assert_eq!(EntryFilter::new().where_sql(), "");

    let f = EntryFilter::new()
        .sheet("work")
        .started_at_or_after(10)
        .closed()
        .ended_at_or_before(20);
    assert_eq!(
        f.where_sql(),
        " WHERE e.sheet = ? AND e.start_time >= ? AND e.end_time IS NOT NULL AND e.end_time <= ?"
    );
    assert_eq!(
        f.params(),
        &[
            Value::Text("work".into()),
            Value::Integer(10),
            Value::Integer(20)
        ]
    );
}

#[test]
fn test_ticket_and_billable_from_metadata() {
    let mut meta = EntryMeta::new();
    assert_eq!(ticket_number(&meta, Some("12345 fix login")), Some("12345".into()));
    assert_eq!(ticket_number(&meta, Some("see #4242 again")), Some("4242".into()));
    assert_eq!(ticket_number(&meta, Some("plain notes")), None);
    assert!(is_billable(&meta));

    meta.insert("ticket_number".into(), "77".into());
    meta.insert("billable".into(), "no".into());
    assert_eq!(ticket_number(&meta, Some("12345 fix login")), Some("77".into()));
    assert!(!is_billable(&meta));
}
