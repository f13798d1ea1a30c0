use std::sync::Arc;

use cashflow_core::{
    core::{FixedClock, ProjectionService},
    domain::{
        Account, AccountClassification, Entry, EntryClassification, HouseholdSnapshot,
        RecurringTransaction,
    },
    projection::{DateWindow, EventKind, ProjectionRequest},
    storage::{InMemorySource, JsonSnapshotStore},
};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use tempfile::tempdir;
use uuid::Uuid;

fn build_sample_household(recurring_count: usize, pending_count: usize) -> HouseholdSnapshot {
    let family_id = Uuid::new_v4();
    let mut snapshot = HouseholdSnapshot::new(family_id);
    let checking = snapshot.add_account(Account::new(
        family_id,
        "Checking",
        AccountClassification::Asset,
        Decimal::from(25_000),
    ));
    snapshot.add_account(Account::new(
        family_id,
        "Card",
        AccountClassification::Liability,
        Decimal::from(-1_200),
    ));

    for idx in 0..recurring_count {
        let amount = if idx % 5 == 0 {
            Decimal::from(-2_000)
        } else {
            Decimal::new(1_999 + (idx as i64 % 100) * 100, 2)
        };
        let mut recurring = RecurringTransaction::new(
            family_id,
            format!("Recurring {idx}"),
            amount,
            (idx % 31) as u32 + 1,
        );
        recurring.occurrence_count = (idx % 8) as u32;
        snapshot.add_recurring(recurring);
    }

    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    for idx in 0..pending_count {
        let date = start + Duration::days((idx % 365) as i64);
        snapshot.add_entry(
            Entry::new(
                family_id,
                checking,
                date,
                "Pending",
                EntryClassification::Expense,
                Decimal::new(4_250 + idx as i64, 2),
            )
            .pending(),
        );
    }

    snapshot
}

fn year_service(source: &InMemorySource, family_id: Uuid) -> ProjectionService<'_> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    let window = DateWindow::new(start, end).expect("window");
    ProjectionService::new(source, ProjectionRequest::new(family_id, window))
        .with_clock(Arc::new(FixedClock::new(start)))
}

fn bench_projection(c: &mut Criterion) {
    let snapshot = build_sample_household(black_box(200), black_box(2_000));
    let family_id = snapshot.family_id;
    let source = InMemorySource::new().with_snapshot(snapshot);

    c.bench_function("generate_projection_365d", |b| {
        b.iter(|| {
            let service = year_service(&source, family_id);
            let report = service.generate_projection().expect("projection");
            black_box(report);
        })
    });

    let service = year_service(&source, family_id);
    service.daily_projections().expect("warm cache");
    let injected = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    c.bench_function("scenario_with_transaction_365d", |b| {
        b.iter(|| {
            let curve = service
                .scenario_with_transaction(
                    Decimal::from(1_500),
                    injected,
                    EventKind::Expense,
                    "Bench",
                )
                .expect("scenario");
            black_box(curve);
        })
    });
}

fn bench_snapshot_io(c: &mut Criterion) {
    let snapshot = build_sample_household(black_box(200), black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let store = JsonSnapshotStore::new(Some(dir.path().to_path_buf())).expect("store");

    c.bench_function("snapshot_save_10k", |b| {
        b.iter(|| {
            store.save_snapshot(&snapshot).expect("save snapshot");
        })
    });

    store.save_snapshot(&snapshot).expect("seed");

    c.bench_function("snapshot_load_10k", |b| {
        b.iter(|| {
            let loaded = store.load_snapshot(snapshot.family_id).expect("load snapshot");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_projection, bench_snapshot_io);
criterion_main!(benches);
