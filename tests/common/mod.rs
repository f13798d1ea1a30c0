#![allow(dead_code)]

use std::sync::Arc;

use cashflow_core::{
    core::{FixedClock, ProjectionService},
    domain::{
        Account, AccountClassification, Entry, EntryClassification, HouseholdSnapshot,
        RecurringTransaction,
    },
    projection::{DateWindow, ProjectionRequest},
    storage::InMemorySource,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Builder for a single-household snapshot used across integration suites.
pub struct HouseholdBuilder {
    pub snapshot: HouseholdSnapshot,
    pub checking: Uuid,
}

impl HouseholdBuilder {
    /// Household with one active checking account holding `balance`.
    pub fn with_checking(balance: Decimal) -> Self {
        let family_id = Uuid::new_v4();
        let mut snapshot = HouseholdSnapshot::new(family_id);
        let checking = snapshot.add_account(Account::new(
            family_id,
            "Checking",
            AccountClassification::Asset,
            balance,
        ));
        Self { snapshot, checking }
    }

    pub fn family_id(&self) -> Uuid {
        self.snapshot.family_id
    }

    pub fn account(mut self, classification: AccountClassification, balance: Decimal) -> Self {
        let family_id = self.family_id();
        self.snapshot
            .add_account(Account::new(family_id, "Other", classification, balance));
        self
    }

    pub fn pending(
        mut self,
        day: NaiveDate,
        classification: EntryClassification,
        amount: Decimal,
    ) -> Self {
        let family_id = self.family_id();
        let checking = self.checking;
        self.snapshot.add_entry(
            Entry::new(family_id, checking, day, "Pending entry", classification, amount)
                .pending(),
        );
        self
    }

    pub fn recurring(mut self, configure: impl FnOnce(&mut RecurringTransaction)) -> Self {
        let mut recurring =
            RecurringTransaction::new(self.family_id(), "Recurring", Decimal::ZERO, 1);
        configure(&mut recurring);
        self.snapshot.add_recurring(recurring);
        self
    }

    pub fn source(&self) -> InMemorySource {
        InMemorySource::new().with_snapshot(self.snapshot.clone())
    }
}

/// Service over `[start, end]` with "today" pinned to `today`.
pub fn service_for<'a>(
    source: &'a InMemorySource,
    family_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> ProjectionService<'a> {
    let window = DateWindow::new(start, end).expect("valid window");
    ProjectionService::new(source, ProjectionRequest::new(family_id, window))
        .with_clock(Arc::new(FixedClock::new(today)))
}
