use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    domain::{Account, Entry, HouseholdScoped, HouseholdSnapshot, RecurringTransaction},
    errors::{ProjectionError, Result},
    projection::DateWindow,
};

use super::{snapshot_entries, FinancialDataSource};

/// Data source holding household snapshots in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    households: HashMap<Uuid, HouseholdSnapshot>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, snapshot: HouseholdSnapshot) -> Self {
        self.insert(snapshot);
        self
    }

    /// Stores `snapshot`, replacing any previous one for the same household.
    pub fn insert(&mut self, snapshot: HouseholdSnapshot) {
        self.households.insert(snapshot.family_id, snapshot);
    }

    pub fn snapshot(&self, family_id: Uuid) -> Result<&HouseholdSnapshot> {
        self.households
            .get(&family_id)
            .ok_or(ProjectionError::HouseholdNotFound(family_id))
    }
}

fn owned_by<T: HouseholdScoped + Clone>(items: &[T], family_id: Uuid) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.family_id() == family_id)
        .cloned()
        .collect()
}

impl FinancialDataSource for InMemorySource {
    fn accounts(&self, family_id: Uuid) -> Result<Vec<Account>> {
        Ok(owned_by(&self.snapshot(family_id)?.accounts, family_id))
    }

    fn entries_between(
        &self,
        family_id: Uuid,
        window: &DateWindow,
        account_ids: Option<&[Uuid]>,
    ) -> Result<Vec<Entry>> {
        let entries = snapshot_entries(self.snapshot(family_id)?, window, account_ids);
        Ok(owned_by(&entries, family_id))
    }

    fn recurring_transactions(&self, family_id: Uuid) -> Result<Vec<RecurringTransaction>> {
        Ok(owned_by(&self.snapshot(family_id)?.recurring, family_id))
    }
}
