//! Confidence scoring.
//!
//! Two independent decay passes exist. [`ConfidenceModel::event_confidence`] decays a
//! recurring event's base score by its distance from today.
//! [`ConfidenceModel::day_confidence`] decays a day's mean score by its distance from
//! the start of the requested window. A recurring event inside a curve goes through
//! both.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{
    config::{ConfidenceSettings, MIN_CONFIDENCE_FLOOR},
    domain::RecurringTransaction,
};

use super::event::ProjectedEvent;

#[derive(Debug, Clone)]
pub struct ConfidenceModel {
    settings: ConfidenceSettings,
}

impl Default for ConfidenceModel {
    fn default() -> Self {
        Self::new(ConfidenceSettings::default())
    }
}

impl ConfidenceModel {
    pub fn new(settings: ConfidenceSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ConfidenceSettings {
        &self.settings
    }

    /// Fixed score for pending entries, held to `[floor, 1]`. No per-event decay
    /// applies.
    pub fn pending_confidence(&self) -> Decimal {
        self.bounded(self.settings.pending)
    }

    /// Provenance score before decay. A stored override replaces the computed base.
    pub fn base_confidence(&self, recurring: &RecurringTransaction) -> Decimal {
        if let Some(stored) = recurring.confidence_score {
            return stored;
        }
        if recurring.manual {
            self.settings.manual_recurring
        } else if recurring.occurrence_count >= self.settings.established_occurrences {
            self.settings.auto_recurring
        } else {
            self.settings.new_recurring
        }
    }

    /// Per-event score for a recurring occurrence on `date`, decayed from `today`.
    pub fn event_confidence(
        &self,
        recurring: &RecurringTransaction,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Decimal {
        let days_out = (date - today).num_days();
        self.decay(self.base_confidence(recurring), days_out)
    }

    /// Day-level score: mean of the day's event scores (1.0 when the day is empty),
    /// decayed by `day_offset` days from the window start.
    pub fn day_confidence(&self, events: &[&ProjectedEvent], day_offset: i64) -> Decimal {
        let mean = if events.is_empty() {
            Decimal::ONE
        } else {
            let total: Decimal = events.iter().map(|event| event.confidence).sum();
            total / Decimal::from(events.len())
        };
        self.decay(mean, day_offset)
    }

    /// `score * (1 - days * decay_per_day)`, clamped to `[floor, 1]` and rounded to
    /// two decimals.
    pub fn decay(&self, score: Decimal, days: i64) -> Decimal {
        let factor = Decimal::ONE - Decimal::from(days) * self.settings.decay_per_day;
        self.bounded(score * factor)
    }

    /// Floor below [`MIN_CONFIDENCE_FLOOR`] is raised to it.
    fn floor(&self) -> Decimal {
        self.settings.floor.max(MIN_CONFIDENCE_FLOOR)
    }

    fn bounded(&self, score: Decimal) -> Decimal {
        score
            .max(self.floor())
            .min(Decimal::ONE)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Coarse bucket for a confidence score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: Decimal) -> Self {
        if score >= dec!(0.8) {
            ConfidenceLevel::High
        } else if score >= dec!(0.5) {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Whole-number percentage of a confidence score.
pub fn confidence_percentage(score: Decimal) -> u32 {
    use rust_decimal::prelude::ToPrimitive;

    (score * dec!(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}
