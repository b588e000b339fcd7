use rtimebook::db::queries;
use rtimebook::errors::AppError;
use rtimebook::models::EntryMeta;

mod common;
use common::{Session, at};

#[test]
fn test_in_on_fresh_store_creates_one_active_entry() {
    let mut s = Session::new();
    let t0 = at("2013-05-01 09:00");

    s.run(t0, &["in", "task A"]).expect("in");

    let rows = queries::get_entry_rows(s.conn()).expect("rows");
    assert_eq!(rows.len(), 1);
    let e = &rows[0];
    assert_eq!(e.id, 1);
    assert_eq!(e.sheet, "default");
    assert_eq!(e.start_time, t0);
    assert_eq!(e.end_time, None);
    assert_eq!(e.description.as_deref(), Some("task A"));
    assert_eq!(e.extra, None);
}

#[test]
fn test_out_all_closes_every_sheet() {
    let mut s = Session::new();
    let t0 = at("2013-05-01 09:00");
    let t1 = at("2013-05-01 09:30");
    let t2 = at("2013-05-01 11:00");

    s.run(t0, &["in", "x"]).expect("in x");
    s.run(t0, &["switch", "other"]).expect("switch other");
    s.run(t1, &["in", "y"]).expect("in y");
    s.run(t1, &["switch", "default"]).expect("switch default");
    s.run(t2, &["out", "--all"]).expect("out --all");

    let rows = queries::get_entry_rows(s.conn()).expect("rows");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|e| e.end_time == Some(t2)));
}

#[test]
fn test_out_all_with_nothing_running_fails() {
    let mut s = Session::new();
    let err = s.run(at("2013-05-01 09:00"), &["out", "--all"]).unwrap_err();
    assert!(matches!(err, AppError::NothingActive));
}

#[test]
fn test_second_in_on_same_sheet_is_rejected() {
    let mut s = Session::new();
    s.run(at("2013-05-01 09:00"), &["in", "first"]).expect("in");

    let err = s.run(at("2013-05-01 09:10"), &["in", "second"]).unwrap_err();
    assert!(matches!(err, AppError::AlreadyActive(ref sheet) if sheet == "default"));

    let active = queries::get_active_entries(s.conn()).expect("active");
    assert_eq!(active.len(), 1);
}

#[test]
fn test_out_without_active_entry_fails() {
    let mut s = Session::new();
    let err = s.run(at("2013-05-01 09:00"), &["out"]).unwrap_err();
    assert!(matches!(err, AppError::NotActive(ref sheet) if sheet == "default"));
}

#[test]
fn test_out_before_start_is_negative_and_writes_nothing() {
    let mut s = Session::new();
    let now = at("2013-05-01 12:00");
    s.run(now, &["in", "-a", "2013-05-01 10:00", "work"]).expect("in");

    let err = s.run(now, &["out", "-a", "2013-05-01 09:00"]).unwrap_err();
    assert!(matches!(err, AppError::NegativeDuration { .. }));

    let rows = queries::get_entry_rows(s.conn()).expect("rows");
    assert_eq!(rows[0].end_time, None);
}

#[test]
fn test_out_verbose_prints_duration() {
    let mut s = Session::new();
    s.run(at("2013-05-01 09:00"), &["in"]).expect("in");
    let out = s.run(at("2013-05-01 10:30"), &["out", "-v"]).expect("out");
    assert_eq!(out, "1:30:00\n");
}

#[test]
fn test_in_before_last_clockout_overlaps() {
    let mut s = Session::new();
    s.run(at("2013-05-01 09:00"), &["in"]).expect("in");
    s.run(at("2013-05-01 10:00"), &["out"]).expect("out");

    let err = s
        .run(at("2013-05-01 11:00"), &["in", "-a", "2013-05-01 09:30"])
        .unwrap_err();
    assert!(matches!(err, AppError::Overlap(_)));
}

#[test]
fn test_in_with_switch_and_out_restarts_target_sheet() {
    let mut s = Session::new();
    s.run(at("2013-05-01 08:00"), &["switch", "other"]).expect("switch");
    s.run(at("2013-05-01 08:00"), &["in", "a"]).expect("in other");
    s.run(at("2013-05-01 08:30"), &["switch", "default"]).expect("switch back");

    s.run(at("2013-05-01 09:00"), &["in", "--switch", "other", "--out", "b"])
        .expect("in --switch --out");

    assert_eq!(queries::get_current_sheet(s.conn()).unwrap(), "other");
    let rows = queries::get_entry_rows(s.conn()).expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].sheet, "other");
    assert_eq!(rows[0].end_time, Some(at("2013-05-01 09:00")));
    assert_eq!(rows[1].sheet, "other");
    assert_eq!(rows[1].start_time, at("2013-05-01 09:00"));
    assert_eq!(rows[1].description.as_deref(), Some("b"));
    assert_eq!(rows[1].end_time, None);
}

#[test]
fn test_in_with_switch_and_out_leaves_previous_sheet_running() {
    let mut s = Session::new();
    s.run(at("2013-05-01 09:00"), &["in", "coding"]).expect("in");
    s.run(at("2013-05-01 10:00"), &["in", "-o", "-s", "meetings", "standup"])
        .expect("in --out --switch");

    assert_eq!(queries::get_current_sheet(s.conn()).unwrap(), "meetings");

    let rows = queries::get_entry_rows(s.conn()).expect("rows");
    assert_eq!(rows[0].sheet, "default");
    assert_eq!(rows[0].end_time, None);
    assert_eq!(rows[1].sheet, "meetings");
    assert_eq!(rows[1].end_time, None);
}

#[test]
fn test_failed_in_rolls_back_switch() {
    let mut s = Session::new();
    s.run(at("2013-05-01 09:00"), &["switch", "other"]).expect("switch");
    s.run(at("2013-05-01 09:00"), &["in", "busy"]).expect("in other");
    s.run(at("2013-05-01 09:05"), &["switch", "default"]).expect("switch back");

    let err = s
        .run(at("2013-05-01 09:10"), &["in", "-s", "other", "again"])
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyActive(_)));
    assert_eq!(queries::get_current_sheet(s.conn()).unwrap(), "default");
}

#[test]
fn test_resume_copies_description_and_metadata() {
    let mut s = Session::new();
    s.run(at("2013-05-01 09:00"), &["in", "-t", "4242", "--non-billable", "fix login"])
        .expect("in");
    s.run(at("2013-05-01 10:00"), &["out"]).expect("out");
    s.run(at("2013-05-01 11:00"), &["in", "-r", "--meta", "phase=2"])
        .expect("resume");

    let rows = queries::get_entry_rows(s.conn()).expect("rows");
    assert_eq!(rows[1].description.as_deref(), Some("fix login"));

    let meta = queries::get_entry_meta(s.conn(), rows[1].id).expect("meta");
    assert_eq!(meta.get("ticket_number").map(String::as_str), Some("4242"));
    assert_eq!(meta.get("billable").map(String::as_str), Some("no"));
    assert_eq!(meta.get("phase").map(String::as_str), Some("2"));
}

#[test]
fn test_entry_meta_updates_merge() {
    let mut s = Session::new();
    s.run(at("2013-05-01 09:00"), &["in"]).expect("in");
    let id = queries::get_entry_rows(s.conn()).unwrap()[0].id;

    let a: EntryMeta = [("a".to_string(), "1".to_string())].into_iter().collect();
    let b: EntryMeta = [("b".to_string(), "2".to_string())].into_iter().collect();
    queries::update_entry_meta(s.conn(), id, &a).expect("a");
    queries::update_entry_meta(s.conn(), id, &b).expect("b");

    let meta = queries::get_entry_meta(s.conn(), id).expect("meta");
    assert_eq!(meta.len(), 2);
    assert_eq!(meta["a"], "1");
    assert_eq!(meta["b"], "2");
}

#[test]
fn test_switch_verbose_reports_entry_count() {
    let mut s = Session::new();
    let now = at("2013-05-01 09:00");

    let out = s.run(now, &["switch", "-v", "fresh"]).expect("switch");
    assert_eq!(out, "switched to empty timesheet \"fresh\"\n");

    s.run(now, &["in"]).expect("in");
    s.run(now, &["switch", "default"]).expect("switch");
    let out = s.run(now, &["switch", "-v", "fresh"]).expect("switch");
    assert_eq!(out, "switched to timesheet \"fresh\" (1 entry)\n");
}

#[test]
fn test_alter_changes_description_only_when_given() {
    let mut s = Session::new();
    s.run(at("2013-05-01 09:00"), &["in", "draft"]).expect("in");

    s.run(at("2013-05-01 09:10"), &["alter", "-t", "777"]).expect("alter meta");
    let rows = queries::get_entry_rows(s.conn()).unwrap();
    assert_eq!(rows[0].description.as_deref(), Some("draft"));

    s.run(at("2013-05-01 09:20"), &["alter", "final", "words"]).expect("alter notes");
    let rows = queries::get_entry_rows(s.conn()).unwrap();
    assert_eq!(rows[0].description.as_deref(), Some("final words"));
    assert_eq!(rows[0].start_time, at("2013-05-01 09:00"));

    let meta = queries::get_entry_meta(s.conn(), rows[0].id).unwrap();
    assert_eq!(meta["ticket_number"], "777");
}

#[test]
fn test_alter_without_target_fails() {
    let mut s = Session::new();
    let err = s.run(at("2013-05-01 09:00"), &["alter", "x"]).unwrap_err();
    assert!(matches!(err, AppError::NotActive(_)));

    let err = s.run(at("2013-05-01 09:00"), &["alter", "--id", "99", "x"]).unwrap_err();
    assert!(matches!(err, AppError::EntryNotFound(99)));
}

#[test]
fn test_kill_is_canceled_without_yes() {
    let mut s = Session::new();
    let now = at("2013-05-01 09:00");
    s.run(now, &["in"]).expect("in");

    let out = s.run_with_input(now, &["kill"], "n\n").expect("kill");
    assert!(out.starts_with("delete timesheet default? "));
    assert!(out.ends_with("canceled\n"));

    let out = s.run_with_input(now, &["kill"], "").expect("kill on eof");
    assert!(out.ends_with("canceled\n"));

    assert_eq!(queries::get_entry_count(s.conn(), "default").unwrap(), 1);
}

#[test]
fn test_kill_current_sheet_switches_to_default() {
    let mut s = Session::new();
    let now = at("2013-05-01 09:00");
    s.run(now, &["switch", "scratch"]).expect("switch");
    s.run(now, &["in", "-t", "12", "temp"]).expect("in");

    s.run_with_input(now, &["kill"], "YES\n").expect("kill");

    assert_eq!(queries::get_entry_count(s.conn(), "scratch").unwrap(), 0);
    assert_eq!(queries::get_current_sheet(s.conn()).unwrap(), "default");
    let leftover: i64 = s
        .conn()
        .query_row("SELECT COUNT(*) FROM entry_meta", [], |r| r.get(0))
        .unwrap();
    assert_eq!(leftover, 0);
}

#[test]
fn test_insert_adds_closed_entry() {
    let mut s = Session::new();
    let now = at("2013-05-02 12:00");
    let out = s
        .run(now, &["insert", "2013-05-01 09:00", "2013-05-01 10:00", "review"])
        .expect("insert");
    assert_eq!(out, "");

    let rows = queries::get_entry_rows(s.conn()).unwrap();
    assert_eq!(rows[0].end_time, Some(at("2013-05-01 10:00")));

    let err = s
        .run(now, &["insert", "2013-05-01 09:30", "2013-05-01 11:00", "clash"])
        .unwrap_err();
    assert!(matches!(err, AppError::Overlap(_)));

    let err = s
        .run(now, &["insert", "2013-05-01 15:00", "2013-05-01 14:00", "backwards"])
        .unwrap_err();
    assert!(matches!(err, AppError::NegativeDuration { .. }));
}

#[test]
fn test_unparsable_time_is_reported() {
    let mut s = Session::new();
    let err = s.run(at("2013-05-01 09:00"), &["in", "-a", "tomorrowish"]).unwrap_err();
    assert_eq!(err.to_string(), "tomorrowish is not in a valid time format");
}
