//! What-if adjustments applied to a materialized event list.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    curve::{BalancePoint, ScenarioPoint},
    event::{sort_events_by_date, EventKind, ProjectedEvent},
};

pub const DEFAULT_SCENARIO_DESCRIPTION: &str = "Hypothetical transaction";

/// A hypothetical change to replay against the baseline projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scenario {
    AddTransaction {
        amount: Decimal,
        date: NaiveDate,
        kind: EventKind,
        description: String,
    },
    RemoveRecurring {
        recurring_id: Uuid,
    },
    Baseline,
}

impl Scenario {
    /// Builds an added transaction from a signed amount: negative values are income.
    pub fn add_signed(amount: Decimal, date: NaiveDate, description: Option<&str>) -> Self {
        Scenario::AddTransaction {
            amount: amount.abs(),
            date,
            kind: EventKind::from_signed(amount),
            description: description
                .filter(|text| !text.trim().is_empty())
                .unwrap_or(DEFAULT_SCENARIO_DESCRIPTION)
                .to_string(),
        }
    }

    pub fn remove_recurring(recurring_id: Uuid) -> Self {
        Scenario::RemoveRecurring { recurring_id }
    }
}

/// Baseline events plus one hypothetical event, re-sorted by date.
pub fn with_transaction(baseline: &[ProjectedEvent], added: ProjectedEvent) -> Vec<ProjectedEvent> {
    let mut events = baseline.to_vec();
    events.push(added);
    sort_events_by_date(&mut events);
    events
}

/// Baseline events minus every occurrence of one recurring definition.
pub fn without_recurring(baseline: &[ProjectedEvent], recurring_id: Uuid) -> Vec<ProjectedEvent> {
    baseline
        .iter()
        .filter(|event| !event.is_from_recurring(recurring_id))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

/// Ending-balance difference between the baseline and a scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioComparison {
    pub original_ending_balance: Decimal,
    pub scenario_ending_balance: Decimal,
    pub difference: Decimal,
    pub impact: Impact,
}

impl ScenarioComparison {
    /// `None` when either curve is empty.
    pub fn between(original: &[BalancePoint], scenario: &[ScenarioPoint]) -> Option<Self> {
        let original_end = original.last()?.balance;
        let scenario_end = scenario.last()?.balance;
        let difference = (scenario_end - original_end)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let impact = if scenario_end > original_end {
            Impact::Positive
        } else if scenario_end < original_end {
            Impact::Negative
        } else {
            Impact::Neutral
        };
        Some(Self {
            original_ending_balance: original_end,
            scenario_ending_balance: scenario_end,
            difference,
            impact,
        })
    }
}

/// Baseline curve, scenario curve and their comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioOutcome {
    pub original: Vec<BalancePoint>,
    pub scenario: Vec<ScenarioPoint>,
    pub comparison: Option<ScenarioComparison>,
}
