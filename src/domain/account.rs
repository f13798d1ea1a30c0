use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::HouseholdScoped;

/// A household account as exposed by the data source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub family_id: Uuid,
    pub name: String,
    pub classification: AccountClassification,
    #[serde(default)]
    pub status: AccountStatus,
    pub balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Account {
    /// Creates an active account with the provided classification and balance.
    pub fn new(
        family_id: Uuid,
        name: impl Into<String>,
        classification: AccountClassification,
        balance: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            family_id,
            name: name.into(),
            classification,
            status: AccountStatus::Active,
            balance,
            currency: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

impl HouseholdScoped for Account {
    fn family_id(&self) -> Uuid {
        self.family_id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountClassification {
    Asset,
    Liability,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}
