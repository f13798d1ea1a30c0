//! Monthly occurrence expansion for recurring definitions.
//!
//! Occurrences are anchored to a fixed day of the month. Months too short for the
//! anchor clamp to their last day, so an anchor of 31 lands on February 28 (or 29).

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::RecurringTransaction;

use super::window::DateWindow;

/// Returns every expected occurrence of `recurring` that falls inside `window`, in
/// ascending order. A fresh sequence is computed on each call.
pub fn occurrence_dates(recurring: &RecurringTransaction, window: &DateWindow) -> Vec<NaiveDate> {
    let anchor = recurring.expected_day_of_month;
    let mut dates = Vec::new();
    let mut current = recurring
        .next_expected_date
        .unwrap_or_else(|| first_occurrence(anchor, window.start()));

    while current <= window.end() {
        if current >= window.start() {
            dates.push(current);
        }
        current = next_monthly_date(current, anchor);
    }

    dates
}

/// First anchored date on or after `start`: this month if the anchor has not
/// passed yet, otherwise next month.
pub fn first_occurrence(anchor_day: u32, start: NaiveDate) -> NaiveDate {
    let this_month = anchored_date(start.year(), start.month(), anchor_day);
    if this_month >= start {
        this_month
    } else {
        next_monthly_date(start, anchor_day)
    }
}

/// The anchored date in the month following `from`.
pub fn next_monthly_date(from: NaiveDate, anchor_day: u32) -> NaiveDate {
    let (year, month) = if from.month() == 12 {
        (from.year() + 1, 1)
    } else {
        (from.year(), from.month() + 1)
    };
    anchored_date(year, month, anchor_day)
}

/// `anchor_day` in the given month, clamped to the month's last day when the
/// month is shorter. Anchors outside `1..=31` also resolve to the last day.
pub fn anchored_date(year: i32, month: u32, anchor_day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, anchor_day) {
        Some(date) if anchor_day > 0 => date,
        _ => last_day_of_month(year, month),
    }
}

/// Last calendar day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    last_day_of_month(date.year(), date.month())
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| first_next - Duration::days(1))
        .unwrap_or(NaiveDate::MAX)
}
