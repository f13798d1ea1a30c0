use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::HouseholdScoped;

/// A transaction entry recorded against one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub family_id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    pub name: String,
    pub classification: EntryClassification,
    /// Amount as stored by the source; its sign carries no meaning here.
    pub amount: Decimal,
    /// Recorded but not yet cleared by the institution.
    #[serde(default)]
    pub pending: bool,
}

impl Entry {
    pub fn new(
        family_id: Uuid,
        account_id: Uuid,
        date: NaiveDate,
        name: impl Into<String>,
        classification: EntryClassification,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            family_id,
            account_id,
            date,
            name: name.into(),
            classification,
            amount,
            pending: false,
        }
    }

    pub fn pending(mut self) -> Self {
        self.pending = true;
        self
    }
}

impl HouseholdScoped for Entry {
    fn family_id(&self) -> Uuid {
        self.family_id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryClassification {
    Income,
    Expense,
}
