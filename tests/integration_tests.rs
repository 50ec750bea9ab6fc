//! Integration tests
//!
//! Drives paging over user-defined hosts and the CLI runner end to end.

use clap::Parser;
use client_paging::cli::{Cli, Runner};
use client_paging::{
    Collection, Error, EventKind, JsonValue, Paginated, PagingController, PagingOptions, PerPage,
    Record, SerdeRecord, Target,
};
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ============================================================================
// Custom Hosts
// ============================================================================

#[derive(Debug, Clone)]
struct Contact {
    id: u32,
    name: String,
    email: String,
}

impl Record for Contact {
    fn to_json(&self) -> JsonValue {
        json!({ "id": self.id, "name": self.name })
    }
}

/// Host that owns typed contacts
#[derive(Debug, Default)]
struct AddressBook {
    contacts: Vec<Contact>,
}

impl AddressBook {
    fn with_contacts(n: u32) -> Self {
        let contacts = (1..=n)
            .map(|id| Contact {
                id,
                name: format!("contact-{id:02}"),
                email: format!("c{id}@example.com"),
            })
            .collect();
        Self { contacts }
    }

    fn add(&mut self, id: u32) {
        self.contacts.push(Contact {
            id,
            name: format!("contact-{id:02}"),
            email: String::new(),
        });
    }
}

impl Collection for AddressBook {
    type Record = Contact;

    fn len(&self) -> usize {
        self.contacts.len()
    }

    fn slice(&self, start: usize, end: usize) -> Vec<&Contact> {
        self.contacts.iter().skip(start).take(end.saturating_sub(start)).collect()
    }
}

fn ids(slice: &[JsonValue]) -> Vec<u64> {
    slice.iter().filter_map(|r| r["id"].as_u64()).collect()
}

#[test]
fn test_custom_host_serializes_records() {
    let mut book = Paginated::new(AddressBook::with_contacts(12), &PagingOptions::default());

    let page = book.last_page();
    assert_eq!(
        page,
        vec![
            json!({"id": 11, "name": "contact-11"}),
            json!({"id": 12, "name": "contact-12"}),
        ]
    );
    assert!(book.collection().contacts[0].email.ends_with("@example.com"));
}

#[test]
fn test_custom_host_grows_between_calls() {
    let mut book = Paginated::new(AddressBook::with_contacts(10), &PagingOptions::default());
    assert_eq!(book.max_pages(), 1);

    book.collection_mut().add(11);
    assert_eq!(book.max_pages(), 2);

    let page = book.go_to(2);
    assert_eq!(ids(&page), vec![11]);
}

#[test]
fn test_serde_records_in_deque() {
    #[derive(Serialize)]
    struct Event {
        seq: u32,
        kind: &'static str,
    }

    let events: VecDeque<SerdeRecord<Event>> = (0..7)
        .map(|seq| SerdeRecord(Event { seq, kind: "tick" }))
        .collect();
    let options = PagingOptions::new().with_per_page(PerPage::new(3).unwrap());
    let mut paged = Paginated::new(events, &options);

    let page = paged.go_to("last");
    assert_eq!(page, vec![json!({"seq": 6, "kind": "tick"})]);
    assert_eq!(paged.current_page(), 3);
}

#[test]
fn test_controller_as_named_field() {
    /// A view model that composes paging explicitly
    struct ContactList {
        book: AddressBook,
        paging: PagingController,
    }

    impl ContactList {
        fn new(book: AddressBook) -> Self {
            let paging = PagingController::attach(&book, &PagingOptions::default());
            Self { book, paging }
        }

        fn show(&mut self, target: Target) -> Vec<u64> {
            ids(&self.paging.go_to(&self.book, target))
        }
    }

    let mut list = ContactList::new(AddressBook::with_contacts(35));
    assert_eq!(list.show(Target::Absolute(4)), (31..=35).collect::<Vec<u64>>());
    assert_eq!(list.show(Target::Previous), (21..=30).collect::<Vec<u64>>());
    assert!(list.paging.has_previous());
}

#[test]
fn test_rendering_observer() {
    let mut paged = Paginated::new(AddressBook::with_contacts(25), &PagingOptions::default());
    let rendered: Arc<Mutex<Vec<String>>> = Arc::default();

    let sink = Arc::clone(&rendered);
    paged.on(EventKind::CurrentPage, move |event| {
        let names: Vec<&str> = event
            .slice()
            .iter()
            .filter_map(|r| r["name"].as_str())
            .collect();
        sink.lock()
            .unwrap()
            .push(format!("page {}: {}", event.value(), names.join(",")));
    });

    paged.set_page_size(10).unwrap();
    paged.go_to("last");

    let rendered = rendered.lock().unwrap();
    assert_eq!(rendered.len(), 2);
    assert!(rendered[0].starts_with("page 1: contact-01,contact-02"));
    assert_eq!(rendered[1], "page 3: contact-21,contact-22,contact-23,contact-24,contact-25");
}

#[test]
fn test_invalid_page_size_is_reported() {
    let mut paged = Paginated::new(AddressBook::with_contacts(5), &PagingOptions::default());
    let err = paged.set_page_size(&json!("10")).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "per_page"));
    assert_eq!(paged.per_page(), 10);
}

// ============================================================================
// CLI Runner
// ============================================================================

struct Fixture {
    _dir: TempDir,
    records: PathBuf,
    options: PathBuf,
}

fn fixture(count: u64) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let records = dir.path().join("records.json");
    let data: Vec<JsonValue> = (0..count).map(|i| json!({ "id": i })).collect();
    std::fs::write(&records, serde_json::to_string(&data).unwrap()).unwrap();

    let options = dir.path().join("paging.yaml");
    std::fs::write(&options, "pagingState:\n  perPage: 10\n  currentPage: 3\n").unwrap();

    Fixture {
        _dir: dir,
        records,
        options,
    }
}

fn runner(fixture: &Fixture, args: &[&str]) -> Runner {
    let records = fixture.records.to_string_lossy().into_owned();
    let options = fixture.options.to_string_lossy().into_owned();
    let mut argv = vec!["client-paging", "-r", records.as_str(), "-o", options.as_str()];
    argv.extend_from_slice(args);
    Runner::new(Cli::parse_from(argv))
}

#[test]
fn test_cli_info_uses_options_file() {
    let fixture = fixture(25);
    let report = runner(&fixture, &["info"]).execute().unwrap();

    assert_eq!(report.page.current_page, 3);
    assert_eq!(report.page.per_page, 10);
    assert_eq!(ids(&report.records), (20..25).collect::<Vec<u64>>());
    assert!(report.events.is_empty());
}

#[test]
fn test_cli_per_page_reports_both_events() {
    let fixture = fixture(25);
    let report = runner(&fixture, &["per-page", "5"]).execute().unwrap();

    assert_eq!(ids(&report.records), (10..15).collect::<Vec<u64>>());
    let names: Vec<&str> = report.events.iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["state-change:currentPage", "state-change:perPage"]);
    assert_eq!(report.events[1].value, 5);
    assert_eq!(report.events[1].records, 5);
}

#[test]
fn test_cli_per_page_rejects_fraction() {
    let fixture = fixture(25);
    let err = runner(&fixture, &["per-page", "3.5"]).execute().unwrap_err();
    assert!(err.is_invalid_argument());

    let err = runner(&fixture, &["per-page", "\"5\""]).execute().unwrap_err();
    assert!(err.is_invalid_argument());

    let err = runner(&fixture, &["per-page", "five"]).execute().unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_cli_flags_override_options_file() {
    let fixture = fixture(25);
    let report = runner(&fixture, &["--page", "1", "--per-page", "4", "next"])
        .execute()
        .unwrap();

    assert_eq!(report.page.current_page, 2);
    assert_eq!(report.page.per_page, 4);
    assert_eq!(ids(&report.records), vec![4, 5, 6, 7]);
}

#[test]
fn test_cli_go_to_clamps() {
    let fixture = fixture(25);
    let report = runner(&fixture, &["go-to", "99"]).execute().unwrap();
    assert_eq!(report.page.current_page, 3);

    let report = runner(&fixture, &["go-to", "-2"]).execute().unwrap();
    assert_eq!(report.page.current_page, 1);

    let report = runner(&fixture, &["go-to", "sideways"]).execute().unwrap();
    assert_eq!(report.page.current_page, 1);
}

#[test]
fn test_cli_report_serializes() {
    let fixture = fixture(3);
    let report = runner(&fixture, &["previous"]).execute().unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["page"]["currentPage"], 1);
    assert_eq!(json["page"]["totalPages"], 1);
    assert_eq!(json["records"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["events"][0]["name"], "state-change:currentPage");
}

#[test]
fn test_cli_missing_records_flag() {
    let runner = Runner::new(Cli::parse_from(["client-paging", "info"]));
    let err = runner.execute().unwrap_err();
    assert!(err.to_string().contains("Records file not specified"));
}
