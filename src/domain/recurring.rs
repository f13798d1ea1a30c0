use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::HouseholdScoped;

/// Template for an expected monthly income or expense.
///
/// `amount` follows the source's sign convention: a negative value is an incoming
/// deposit, anything else is an outflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringTransaction {
    pub id: Uuid,
    pub family_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    pub amount: Decimal,
    pub expected_day_of_month: u32,
    #[serde(default)]
    pub status: RecurringStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused_until: Option<NaiveDate>,
    /// Entered by hand rather than detected from transaction history.
    #[serde(default)]
    pub manual: bool,
    #[serde(default)]
    pub occurrence_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_amount_avg: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_amount_min: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_amount_max: Option<Decimal>,
    /// Stored override for the base confidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_expected_date: Option<NaiveDate>,
}

impl RecurringTransaction {
    /// Creates an active, auto-detected definition with no observed occurrences.
    pub fn new(
        family_id: Uuid,
        name: impl Into<String>,
        amount: Decimal,
        expected_day_of_month: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            family_id,
            name: name.into(),
            merchant_name: None,
            amount,
            expected_day_of_month,
            status: RecurringStatus::Active,
            paused_until: None,
            manual: false,
            occurrence_count: 0,
            expected_amount_avg: None,
            expected_amount_min: None,
            expected_amount_max: None,
            confidence_score: None,
            next_expected_date: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RecurringStatus::Active
    }

    /// A definition is paused while its `paused_until` date has not passed.
    pub fn is_paused(&self, today: NaiveDate) -> bool {
        self.paused_until.is_some_and(|until| until >= today)
    }

    pub fn display_name(&self) -> &str {
        self.merchant_name.as_deref().unwrap_or(&self.name)
    }

    /// Signed amount each occurrence is expected to carry.
    pub fn projected_amount(&self) -> Decimal {
        match self.expected_amount_avg {
            Some(avg) if self.manual => avg,
            _ => self.amount,
        }
    }
}

impl HouseholdScoped for RecurringTransaction {
    fn family_id(&self) -> Uuid {
        self.family_id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecurringStatus {
    #[default]
    Active,
    Inactive,
}
