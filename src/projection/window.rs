use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::ProjectionConfig,
    errors::{ProjectionError, Result},
    projection::recurrence::end_of_month,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const ROLLING_VIEW_DAYS: i64 = 30;

/// Inclusive calendar range `[start, end]`. Always satisfies `start <= end`,
/// including when deserialized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawWindow")]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked wire form of [`DateWindow`].
#[derive(Debug, Deserialize)]
struct RawWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawWindow> for DateWindow {
    type Error = ProjectionError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        DateWindow::new(raw.start, raw.end)
    }
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ProjectionError::InvalidRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn len_days(&self) -> usize {
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    /// Every day of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Zero-based position of `date` counted from `start`.
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }
}

/// Input configuration for one projection view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectionRequest {
    pub family_id: Uuid,
    pub window: DateWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_ids: Option<Vec<Uuid>>,
}

impl ProjectionRequest {
    pub fn new(family_id: Uuid, window: DateWindow) -> Self {
        Self {
            family_id,
            window,
            account_ids: None,
        }
    }

    /// Restricts the starting balance and pending entries to the given accounts.
    /// An empty list means no restriction.
    pub fn with_accounts(mut self, account_ids: Vec<Uuid>) -> Self {
        self.account_ids = if account_ids.is_empty() {
            None
        } else {
            Some(account_ids)
        };
        self
    }

    /// `[today, today + default_window_days]`.
    pub fn with_defaults(family_id: Uuid, today: NaiveDate, config: &ProjectionConfig) -> Self {
        let end = today + Duration::days(i64::from(config.default_window_days));
        Self::new(family_id, DateWindow { start: today, end })
    }

    /// `[today, today + days]`, the short horizon used for upcoming-event widgets.
    pub fn upcoming(family_id: Uuid, today: NaiveDate, days: u32) -> Self {
        let end = today + Duration::days(i64::from(days));
        Self::new(family_id, DateWindow { start: today, end })
    }

    /// Builds a request from caller-supplied date strings. Blank values fall back to
    /// the defaults; malformed values are rejected.
    pub fn from_params(
        family_id: Uuid,
        start: Option<&str>,
        end: Option<&str>,
        account_ids: Option<Vec<Uuid>>,
        today: NaiveDate,
        config: &ProjectionConfig,
    ) -> Result<Self> {
        let start = parse_date(start)?.unwrap_or(today);
        let end = match parse_date(end)? {
            Some(end) => end,
            None => today + Duration::days(i64::from(config.default_window_days)),
        };
        let window = DateWindow::new(start, end)?;
        Ok(Self::new(family_id, window).with_accounts(account_ids.unwrap_or_default()))
    }

    /// Parses a JSON request. An inverted window is reported as
    /// [`ProjectionError::InvalidRange`].
    pub fn from_json(data: &str) -> Result<Self> {
        let raw: RawRequest = serde_json::from_str(data)?;
        let window = DateWindow::new(raw.window.start, raw.window.end)?;
        let account_ids = raw.account_ids.unwrap_or_default();
        Ok(Self::new(raw.family_id, window).with_accounts(account_ids))
    }

    pub fn account_filter(&self) -> Option<&[Uuid]> {
        self.account_ids.as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    family_id: Uuid,
    window: RawWindow,
    #[serde(default)]
    account_ids: Option<Vec<Uuid>>,
}

/// Parses an ISO `YYYY-MM-DD` date. Absent or blank input yields `None`.
pub fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|err| ProjectionError::InvalidDate(format!("`{}`: {}", value, err)))
}

/// Calendar presets offered by the cash flow view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
    Rolling,
}

impl ViewMode {
    /// Unknown names map to the rolling 30-day view.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "day" => ViewMode::Day,
            "week" => ViewMode::Week,
            "month" => ViewMode::Month,
            _ => ViewMode::Rolling,
        }
    }

    pub fn window_from(&self, start: NaiveDate) -> DateWindow {
        let end = match self {
            ViewMode::Day => start,
            ViewMode::Week => start + Duration::days(6),
            ViewMode::Month => end_of_month(start),
            ViewMode::Rolling => start + Duration::days(ROLLING_VIEW_DAYS),
        };
        DateWindow { start, end }
    }
}
