use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    curve::BalancePoint,
    event::{EventKind, ProjectedEvent},
    window::DateWindow,
};

/// Aggregate totals over a projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_cash_flow: Decimal,
    pub event_count: usize,
    pub starting_balance: Decimal,
    pub ending_balance: Decimal,
    pub date_range: DateWindow,
}

impl ProjectionSummary {
    pub fn build(
        events: &[ProjectedEvent],
        curve: &[BalancePoint],
        starting_balance: Decimal,
        window: DateWindow,
    ) -> Self {
        let total_for = |kind: EventKind| -> Decimal {
            events
                .iter()
                .filter(|event| event.kind == kind)
                .map(|event| event.amount)
                .sum()
        };
        let total_income = total_for(EventKind::Income);
        let total_expenses = total_for(EventKind::Expense);
        Self {
            total_income,
            total_expenses,
            net_cash_flow: total_income - total_expenses,
            event_count: events.len(),
            starting_balance,
            ending_balance: curve
                .last()
                .map(|point| point.balance)
                .unwrap_or(starting_balance),
            date_range: window,
        }
    }
}
