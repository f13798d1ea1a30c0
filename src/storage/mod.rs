pub mod json_backend;
pub mod memory;

use uuid::Uuid;

use crate::{
    domain::{admits_account, Account, Entry, HouseholdSnapshot, RecurringTransaction},
    errors::Result,
    projection::DateWindow,
};

/// Read-only view of a household's accounts, entries and recurring definitions.
pub trait FinancialDataSource: Send + Sync {
    fn accounts(&self, family_id: Uuid) -> Result<Vec<Account>>;

    /// Entries dated inside `window`, optionally restricted to `account_ids`.
    fn entries_between(
        &self,
        family_id: Uuid,
        window: &DateWindow,
        account_ids: Option<&[Uuid]>,
    ) -> Result<Vec<Entry>>;

    fn recurring_transactions(&self, family_id: Uuid) -> Result<Vec<RecurringTransaction>>;
}

/// Entries of `snapshot` inside the window and account filter.
pub(crate) fn snapshot_entries(
    snapshot: &HouseholdSnapshot,
    window: &DateWindow,
    account_ids: Option<&[Uuid]>,
) -> Vec<Entry> {
    snapshot
        .entries
        .iter()
        .filter(|entry| window.contains(entry.date))
        .filter(|entry| admits_account(account_ids, entry.account_id))
        .cloned()
        .collect()
}

pub use json_backend::{load_snapshot_from_path, save_snapshot_to_path, JsonSnapshotStore};
pub use memory::InMemorySource;
