use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a projected cash movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Income,
    Expense,
}

impl EventKind {
    /// Income sorts ahead of expenses on the same day.
    pub fn rank(&self) -> u8 {
        match self {
            EventKind::Income => 0,
            EventKind::Expense => 1,
        }
    }

    /// Derives the kind from a signed amount: negative values are income.
    pub fn from_signed(amount: Decimal) -> Self {
        if amount.is_sign_negative() && !amount.is_zero() {
            EventKind::Income
        } else {
            EventKind::Expense
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventOrigin {
    Pending,
    Recurring,
    Scenario,
}

/// One dated, confidence-scored cash movement expected inside the window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectedEvent {
    pub date: NaiveDate,
    pub kind: EventKind,
    /// Absolute magnitude; `kind` carries the direction.
    pub amount: Decimal,
    pub description: String,
    pub confidence: Decimal,
    pub origin: EventOrigin,
    pub origin_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_ref: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_min: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_max: Option<Decimal>,
}

impl ProjectedEvent {
    pub fn new(
        date: NaiveDate,
        kind: EventKind,
        amount: Decimal,
        description: impl Into<String>,
        confidence: Decimal,
        origin: EventOrigin,
        origin_id: Option<Uuid>,
    ) -> Self {
        Self {
            date,
            kind,
            amount: amount.abs(),
            description: description.into(),
            confidence,
            origin,
            origin_id,
            recurring_ref: None,
            amount_min: None,
            amount_max: None,
        }
    }

    /// Hypothetical event injected by a what-if scenario; always fully trusted.
    pub fn scenario(
        date: NaiveDate,
        kind: EventKind,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            date,
            kind,
            amount,
            description,
            Decimal::ONE,
            EventOrigin::Scenario,
            None,
        )
    }

    /// Amount with its direction applied: income positive, expense negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            EventKind::Income => self.amount,
            EventKind::Expense => -self.amount,
        }
    }

    pub fn is_from_recurring(&self, recurring_id: Uuid) -> bool {
        self.origin == EventOrigin::Recurring && self.origin_id == Some(recurring_id)
    }
}

/// Stable sort by date, income before expenses within a day.
pub fn sort_events(events: &mut [ProjectedEvent]) {
    events.sort_by_key(|event| (event.date, event.kind.rank()));
}

/// Stable sort by date alone, preserving insertion order within a day.
pub fn sort_events_by_date(events: &mut [ProjectedEvent]) {
    events.sort_by_key(|event| event.date);
}
