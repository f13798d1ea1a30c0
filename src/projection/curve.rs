//! Daily running-balance fold over projected events.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{confidence::ConfidenceModel, event::ProjectedEvent, window::DateWindow};

/// End-of-day projected balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: Decimal,
    pub confidence: Decimal,
    pub net_change: Decimal,
    pub event_count: usize,
}

/// Balance point without a confidence score, used for what-if curves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioPoint {
    pub date: NaiveDate,
    pub balance: Decimal,
    pub net_change: Decimal,
    pub event_count: usize,
}

impl From<&BalancePoint> for ScenarioPoint {
    fn from(point: &BalancePoint) -> Self {
        Self {
            date: point.date,
            balance: point.balance,
            net_change: point.net_change,
            event_count: point.event_count,
        }
    }
}

/// Groups events by calendar date, keeping their relative order.
pub fn group_by_date(events: &[ProjectedEvent]) -> BTreeMap<NaiveDate, Vec<&ProjectedEvent>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&ProjectedEvent>> = BTreeMap::new();
    for event in events {
        grouped.entry(event.date).or_default().push(event);
    }
    grouped
}

/// Net signed change of one day's events.
pub fn net_change(events: &[&ProjectedEvent]) -> Decimal {
    events.iter().map(|event| event.signed_amount()).sum()
}

/// Folds `events` into one point per day of `window`, scoring each day with the
/// window-relative decay.
pub fn balance_curve(
    events: &[ProjectedEvent],
    window: &DateWindow,
    starting_balance: Decimal,
    model: &ConfidenceModel,
) -> Vec<BalancePoint> {
    let grouped = group_by_date(events);
    let mut running = starting_balance;
    let mut curve = Vec::with_capacity(window.len_days());

    for (offset, date) in window.days().enumerate() {
        let day_events = grouped.get(&date).map(Vec::as_slice).unwrap_or(&[]);
        let net = net_change(day_events);
        running += net;
        curve.push(BalancePoint {
            date,
            balance: running,
            confidence: model.day_confidence(day_events, offset as i64),
            net_change: net,
            event_count: day_events.len(),
        });
    }

    curve
}

/// Same fold as [`balance_curve`] without day confidence.
pub fn scenario_curve(
    events: &[ProjectedEvent],
    window: &DateWindow,
    starting_balance: Decimal,
) -> Vec<ScenarioPoint> {
    let grouped = group_by_date(events);
    let mut running = starting_balance;
    let mut curve = Vec::with_capacity(window.len_days());

    for date in window.days() {
        let day_events = grouped.get(&date).map(Vec::as_slice).unwrap_or(&[]);
        let net = net_change(day_events);
        running += net;
        curve.push(ScenarioPoint {
            date,
            balance: running,
            net_change: net,
            event_count: day_events.len(),
        });
    }

    curve
}

/// Visual state of a day on the calendar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Negative,
    Warning,
    Positive,
    Neutral,
}

impl DayStatus {
    pub fn classify(balance: Decimal, previous: Option<Decimal>, threshold: Decimal) -> Self {
        if balance < Decimal::ZERO {
            DayStatus::Negative
        } else if balance < threshold {
            DayStatus::Warning
        } else if previous.is_some_and(|previous| balance > previous) {
            DayStatus::Positive
        } else {
            DayStatus::Neutral
        }
    }
}

/// Status for every point of a curve, comparing each day with the one before.
pub fn day_statuses(curve: &[BalancePoint], threshold: Decimal) -> Vec<DayStatus> {
    let mut previous = None;
    curve
        .iter()
        .map(|point| {
            let status = DayStatus::classify(point.balance, previous, threshold);
            previous = Some(point.balance);
            status
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::event::{EventKind, EventOrigin};
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn window() -> DateWindow {
        DateWindow::new(date(1), date(10)).unwrap()
    }

    fn event(day: u32, kind: EventKind, amount: Decimal, confidence: Decimal) -> ProjectedEvent {
        ProjectedEvent::new(
            date(day),
            kind,
            amount,
            "evt",
            confidence,
            EventOrigin::Recurring,
            None,
        )
    }

    #[test]
    fn empty_event_list_still_covers_every_day() {
        let curve = balance_curve(&[], &window(), dec!(250), &ConfidenceModel::default());
        assert_eq!(curve.len(), 10);
        assert!(curve.iter().all(|point| point.balance == dec!(250)));
        assert!(curve.iter().all(|point| point.event_count == 0));
        assert_eq!(curve[0].confidence, Decimal::ONE);
        assert_eq!(curve[9].confidence, dec!(0.98));
    }

    #[test]
    fn running_balance_matches_net_changes() {
        let events = vec![
            event(2, EventKind::Income, dec!(900), dec!(0.9)),
            event(2, EventKind::Expense, dec!(120.50), dec!(0.7)),
            event(6, EventKind::Expense, dec!(40), dec!(0.5)),
        ];
        let curve = balance_curve(&events, &window(), dec!(100), &ConfidenceModel::default());

        assert_eq!(curve[0].balance, dec!(100) + curve[0].net_change);
        for pair in curve.windows(2) {
            assert_eq!(pair[1].balance, pair[0].balance + pair[1].net_change);
        }
        assert_eq!(curve[1].net_change, dec!(779.50));
        assert_eq!(curve[1].event_count, 2);
        // mean 0.8 decayed by one day: 0.8 * 0.998 = 0.7984
        assert_eq!(curve[1].confidence, dec!(0.80));
        assert_eq!(curve[9].balance, dec!(839.50));
    }

    #[test]
    fn scenario_curve_mirrors_balance_curve() {
        let events = vec![event(3, EventKind::Expense, dec!(75), dec!(0.9))];
        let model = ConfidenceModel::default();
        let full = balance_curve(&events, &window(), dec!(500), &model);
        let bare = scenario_curve(&events, &window(), dec!(500));
        let projected: Vec<ScenarioPoint> = full.iter().map(ScenarioPoint::from).collect();
        assert_eq!(projected, bare);
    }

    #[test]
    fn day_status_classification() {
        let threshold = dec!(500);
        assert_eq!(DayStatus::classify(dec!(-1), None, threshold), DayStatus::Negative);
        assert_eq!(DayStatus::classify(dec!(0), None, threshold), DayStatus::Warning);
        assert_eq!(DayStatus::classify(dec!(-0.00), None, threshold), DayStatus::Warning);
        assert_eq!(DayStatus::classify(dec!(-0.01), None, threshold), DayStatus::Negative);
        assert_eq!(
            DayStatus::classify(dec!(800), Some(dec!(700)), threshold),
            DayStatus::Positive
        );
        assert_eq!(
            DayStatus::classify(dec!(800), Some(dec!(800)), threshold),
            DayStatus::Neutral
        );
    }
}
