mod common;

use std::{fs, sync::Arc};

use cashflow_core::{
    core::{FixedClock, ProjectionService},
    domain::EntryClassification,
    errors::ProjectionError,
    projection::{DateWindow, ProjectionRequest},
    storage::{FinancialDataSource, JsonSnapshotStore},
};
use common::{date, HouseholdBuilder};
use rust_decimal_macros::dec;
use tempfile::tempdir;
use uuid::Uuid;

fn sample_household() -> HouseholdBuilder {
    HouseholdBuilder::with_checking(dec!(1520.75))
        .pending(date(2025, 8, 4), EntryClassification::Expense, dec!(64.10))
        .pending(date(2025, 9, 30), EntryClassification::Income, dec!(200))
        .recurring(|rule| {
            rule.name = "Rent".into();
            rule.amount = dec!(1100);
            rule.expected_day_of_month = 1;
        })
}

#[test]
fn snapshot_survives_a_save_and_load() {
    let temp = tempdir().expect("temp dir");
    let store = JsonSnapshotStore::new(Some(temp.path().to_path_buf())).expect("store");
    let household = sample_household();

    store.save_snapshot(&household.snapshot).expect("save");
    assert!(store.snapshot_path(household.family_id()).exists());

    let loaded = store.load_snapshot(household.family_id()).expect("load");
    assert_eq!(loaded, household.snapshot);
    assert_eq!(store.list_households().expect("list"), vec![household.family_id()]);
}

#[test]
fn missing_household_is_not_found() {
    let temp = tempdir().expect("temp dir");
    let store = JsonSnapshotStore::new(Some(temp.path().to_path_buf())).expect("store");
    let family = Uuid::new_v4();

    let err = store.accounts(family).expect_err("no snapshot stored");
    assert!(matches!(err, ProjectionError::HouseholdNotFound(id) if id == family));
}

#[test]
fn corrupt_snapshot_reports_serialization_error() {
    let temp = tempdir().expect("temp dir");
    let store = JsonSnapshotStore::new(Some(temp.path().to_path_buf())).expect("store");
    let family = Uuid::new_v4();
    fs::write(store.snapshot_path(family), "{ not json").expect("write");

    let err = store.load_snapshot(family).expect_err("corrupt file");
    assert!(matches!(err, ProjectionError::Serialization(_)));
}

#[test]
fn listing_skips_foreign_files() {
    let temp = tempdir().expect("temp dir");
    let store = JsonSnapshotStore::new(Some(temp.path().to_path_buf())).expect("store");
    let first = sample_household();
    let second = sample_household();
    store.save_snapshot(&first.snapshot).expect("save first");
    store.save_snapshot(&second.snapshot).expect("save second");
    let households_dir = store
        .snapshot_path(first.family_id())
        .parent()
        .map(|dir| dir.to_path_buf())
        .expect("households dir");
    fs::write(households_dir.join("notes.txt"), "ignore me").expect("write");
    fs::write(households_dir.join("backup.json"), "{}").expect("write");

    let mut expected = vec![first.family_id(), second.family_id()];
    expected.sort();
    assert_eq!(store.list_households().expect("list"), expected);
}

#[test]
fn entries_are_filtered_by_window() {
    let temp = tempdir().expect("temp dir");
    let store = JsonSnapshotStore::new(Some(temp.path().to_path_buf())).expect("store");
    let household = sample_household();
    store.save_snapshot(&household.snapshot).expect("save");

    let window = DateWindow::new(date(2025, 8, 1), date(2025, 8, 31)).expect("window");
    let entries = store
        .entries_between(household.family_id(), &window, None)
        .expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, date(2025, 8, 4));
}

#[test]
fn projection_runs_over_stored_snapshot() {
    let temp = tempdir().expect("temp dir");
    let store = JsonSnapshotStore::new(Some(temp.path().to_path_buf())).expect("store");
    let household = sample_household();
    store.save_snapshot(&household.snapshot).expect("save");

    let start = date(2025, 8, 1);
    let window = DateWindow::new(start, date(2025, 8, 31)).expect("window");
    let request = ProjectionRequest::new(household.family_id(), window);
    let service =
        ProjectionService::new(&store, request).with_clock(Arc::new(FixedClock::new(start)));

    let summary = service.summary().expect("summary");
    assert_eq!(summary.starting_balance, dec!(1520.75));
    assert_eq!(summary.total_expenses, dec!(1164.10));
    assert_eq!(summary.ending_balance, dec!(356.65));
    assert_eq!(summary.event_count, 2);
}

#[test]
fn loaded_source_reads_the_file_once() {
    let temp = tempdir().expect("temp dir");
    let store = JsonSnapshotStore::new(Some(temp.path().to_path_buf())).expect("store");
    let household = sample_household();
    store.save_snapshot(&household.snapshot).expect("save");

    let source = store.load_source(household.family_id()).expect("source");
    fs::remove_file(store.snapshot_path(household.family_id())).expect("remove");

    let start = date(2025, 8, 1);
    let window = DateWindow::new(start, date(2025, 8, 31)).expect("window");
    let request = ProjectionRequest::new(household.family_id(), window);
    let service =
        ProjectionService::new(&source, request).with_clock(Arc::new(FixedClock::new(start)));
    assert_eq!(service.summary().expect("summary").ending_balance, dec!(356.65));
    assert!(matches!(
        store.accounts(household.family_id()),
        Err(ProjectionError::HouseholdNotFound(_))
    ));
}
