use rtimebook::config::{Config, OverlapPolicy};
use rtimebook::db::models::TicketDetails;
use rtimebook::db::{DbPool, migrate, tickets};
use rtimebook::errors::{AppError, AppResult};
use rtimebook::integrations::ticket_lookup::{
    CachedTicketLookup, ChiliProjectSource, TicketLookup, TicketSource,
};
use std::cell::Cell;
use std::rc::Rc;

struct CountingSource {
    calls: Rc<Cell<usize>>,
    fail: bool,
}

impl TicketSource for CountingSource {
    fn fetch(&self, number: i64) -> AppResult<Option<TicketDetails>> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(AppError::Reporting("tracker down".into()));
        }
        if number == 404 {
            return Ok(None);
        }
        Ok(Some(TicketDetails {
            number,
            project: "Acme".into(),
            details: format!("issue {}", number),
        }))
    }
}

fn store() -> DbPool {
    let mut pool = DbPool::in_memory().unwrap();
    migrate::upgrade(&mut pool).unwrap();
    pool
}

#[test]
fn test_remote_answer_is_cached() {
    let pool = store();
    let calls = Rc::new(Cell::new(0));
    let lookup = CachedTicketLookup::new(Some(Box::new(CountingSource {
        calls: calls.clone(),
        fail: false,
    })));

    assert_eq!(
        lookup.description_for_ticket(&pool.conn, "42"),
        Some("Acme: issue 42".to_string())
    );
    assert_eq!(lookup.description_for_ticket(&pool.conn, " 42 "), Some("Acme: issue 42".to_string()));
    assert_eq!(calls.get(), 1);
    assert!(tickets::get_ticket_details(&pool.conn, 42).unwrap().is_some());

    assert_eq!(lookup.details_for_ticket(&pool.conn, "404"), None);
    assert_eq!(lookup.details_for_ticket(&pool.conn, "abc"), None);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_remote_failure_finds_nothing() {
    let pool = store();
    let calls = Rc::new(Cell::new(0));
    let lookup = CachedTicketLookup::new(Some(Box::new(CountingSource {
        calls: calls.clone(),
        fail: true,
    })));

    assert_eq!(lookup.details_for_ticket(&pool.conn, "7"), None);
    assert_eq!(calls.get(), 1);
    assert!(tickets::get_ticket_details(&pool.conn, 7).unwrap().is_none());
}

#[test]
fn test_offline_lookup_uses_cache_only() {
    let pool = store();
    tickets::store_ticket_details(
        &pool.conn,
        &TicketDetails {
            number: 9,
            project: "Ops".into(),
            details: "Rotate keys".into(),
        },
    )
    .unwrap();

    let lookup = CachedTicketLookup::offline();
    assert_eq!(lookup.description_for_ticket(&pool.conn, "9"), Some("Ops: Rotate keys".into()));
    assert_eq!(lookup.description_for_ticket(&pool.conn, "10"), None);
}

#[test]
fn test_chiliproject_issue_url() {
    let source = ChiliProjectSource::new("tracker.example.com/", None);
    assert_eq!(source.issue_url(12), "http://tracker.example.com/issues/12.json");
}

#[test]
fn test_config_sections_and_defaults() {
    let cfg = Config::from_yaml(
        "payperiod_type: TodayOnly\n\
         backdate_overlap: confirm\n\
         auth:\n  username: jo\n  port: 8080\n\
         aliases:\n  mtg: in -s meetings\n",
    )
    .unwrap();

    assert_eq!(cfg.payperiod_type, "TodayOnly");
    assert_eq!(cfg.backdate_overlap, OverlapPolicy::Confirm);
    assert_eq!(cfg.get("auth", "username"), Some("jo".into()));
    assert_eq!(cfg.get("auth", "port"), Some("8080".into()));
    assert_eq!(cfg.get("auth", "password"), None);
    assert!(cfg.has_option("auth", "username"));
    assert!(!cfg.has_option("chiliproject", "domain"));
    assert_eq!(cfg.get_or("auth", "password", "none"), "none");
    assert_eq!(cfg.alias("mtg"), Some("in -s meetings".into()));

    let empty = Config::from_yaml("  \n").unwrap();
    assert_eq!(empty.payperiod_type, "MonthlyOnSecondToLastFriday");
    assert_eq!(empty.backdate_overlap, OverlapPolicy::Adjust);
}

#[test]
fn test_config_load_missing_and_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");
    let cfg = Config::load(Some(missing.to_str().unwrap())).unwrap();
    assert_eq!(cfg.reporting_url, None);

    let bad = dir.path().join("bad.yaml");
    std::fs::write(&bad, "backdate_overlap: [1, 2]\n").unwrap();
    let err = Config::load(Some(bad.to_str().unwrap())).unwrap_err();
    match err {
        AppError::Config(msg) => assert!(msg.starts_with(bad.to_str().unwrap())),
        other => panic!("unexpected error: {other:?}"),
    }
}
