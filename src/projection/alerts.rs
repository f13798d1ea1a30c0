use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::curve::BalancePoint;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowBalance,
    Overdraft,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub date: NaiveDate,
    pub projected_balance: Decimal,
    /// Only set for low-balance alerts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Decimal>,
    pub severity: Severity,
    /// Days from today; negative for days already behind us.
    pub days_until: i64,
}

/// Scans a curve for the earliest low-balance day and the earliest negative day.
///
/// The overdraft alert is dropped when it falls on the same date as the
/// low-balance alert. At most two alerts are returned, ordered by date.
pub fn detect_alerts(curve: &[BalancePoint], threshold: Decimal, today: NaiveDate) -> Vec<Alert> {
    let mut alerts = Vec::with_capacity(2);

    if let Some(low) = curve.iter().find(|point| point.balance < threshold) {
        let severity = if low.balance < Decimal::ZERO {
            Severity::Critical
        } else {
            Severity::Warning
        };
        alerts.push(Alert {
            kind: AlertKind::LowBalance,
            date: low.date,
            projected_balance: low.balance,
            threshold: Some(threshold),
            severity,
            days_until: (low.date - today).num_days(),
        });
    }

    if let Some(negative) = curve.iter().find(|point| point.balance < Decimal::ZERO) {
        if !alerts.iter().any(|alert| alert.date == negative.date) {
            alerts.push(Alert {
                kind: AlertKind::Overdraft,
                date: negative.date,
                projected_balance: negative.balance,
                threshold: None,
                severity: Severity::Critical,
                days_until: (negative.date - today).num_days(),
            });
        }
    }

    alerts.sort_by_key(|alert| alert.date);
    alerts
}
