use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Account, Entry, RecurringTransaction};

/// Everything a data source knows about one household.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HouseholdSnapshot {
    pub family_id: Uuid,
    #[serde(default = "HouseholdSnapshot::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub recurring: Vec<RecurringTransaction>,
}

impl HouseholdSnapshot {
    pub fn new(family_id: Uuid) -> Self {
        Self {
            family_id,
            currency: Self::default_currency(),
            accounts: Vec::new(),
            entries: Vec::new(),
            recurring: Vec::new(),
        }
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        id
    }

    pub fn add_entry(&mut self, entry: Entry) -> Uuid {
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    pub fn add_recurring(&mut self, recurring: RecurringTransaction) -> Uuid {
        let id = recurring.id;
        self.recurring.push(recurring);
        id
    }
}
