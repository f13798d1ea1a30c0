//! Entry point tying the data source, request and projection engine together.

use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::unsync::OnceCell;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::ProjectionConfig,
    core::time::{Clock, SystemClock},
    errors::Result,
    projection::{
        balance_curve, detect_alerts, scenario, scenario_curve, starting_balance, Alert,
        BalancePoint, ConfidenceModel, EventKind, EventMaterializer, ProjectedEvent,
        ProjectionRequest, ProjectionSummary, Scenario, ScenarioComparison, ScenarioOutcome,
        ScenarioPoint,
    },
    storage::FinancialDataSource,
};

/// Everything a cash flow view needs for one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionReport {
    pub projections: Vec<ProjectedEvent>,
    pub balance_curve: Vec<BalancePoint>,
    pub summary: ProjectionSummary,
    pub alerts: Vec<Alert>,
}

/// The first few projected events plus any alerts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingView {
    pub events: Vec<ProjectedEvent>,
    pub alerts: Vec<Alert>,
}

/// Projects one household's balance over the request window.
///
/// The data source is queried lazily on first use. The starting balance and the
/// materialized event list are then memoized for the life of the service, so one
/// instance should back every read of a single view.
pub struct ProjectionService<'a> {
    source: &'a dyn FinancialDataSource,
    request: ProjectionRequest,
    config: ProjectionConfig,
    model: ConfidenceModel,
    clock: Arc<dyn Clock>,
    starting_balance: OnceCell<Decimal>,
    events: OnceCell<Vec<ProjectedEvent>>,
}

impl<'a> ProjectionService<'a> {
    pub fn new(source: &'a dyn FinancialDataSource, request: ProjectionRequest) -> Self {
        Self::with_config(source, request, ProjectionConfig::default())
    }

    pub fn with_config(
        source: &'a dyn FinancialDataSource,
        request: ProjectionRequest,
        config: ProjectionConfig,
    ) -> Self {
        let model = ConfidenceModel::new(config.confidence.clone());
        Self {
            source,
            request,
            config,
            model,
            clock: Arc::new(SystemClock),
            starting_balance: OnceCell::new(),
            events: OnceCell::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn request(&self) -> &ProjectionRequest {
        &self.request
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn starting_balance(&self) -> Result<Decimal> {
        self.starting_balance
            .get_or_try_init(|| -> Result<Decimal> {
                let accounts = self.source.accounts(self.request.family_id)?;
                let balance = starting_balance(&accounts, self.request.account_filter());
                tracing::debug!(
                    family = %self.request.family_id,
                    accounts = accounts.len(),
                    %balance,
                    "computed starting balance"
                );
                Ok(balance)
            })
            .copied()
    }

    /// Every projected event in the window, sorted by date with income first.
    pub fn daily_projections(&self) -> Result<&[ProjectedEvent]> {
        self.events
            .get_or_try_init(|| -> Result<Vec<ProjectedEvent>> {
                let family_id = self.request.family_id;
                let entries = self.source.entries_between(
                    family_id,
                    &self.request.window,
                    self.request.account_filter(),
                )?;
                let recurring = self.source.recurring_transactions(family_id)?;
                let materializer = EventMaterializer::new(&self.request, &self.model, self.today());
                Ok(materializer.materialize(&entries, &recurring))
            })
            .map(Vec::as_slice)
    }

    pub fn balance_curve(&self) -> Result<Vec<BalancePoint>> {
        Ok(balance_curve(
            self.daily_projections()?,
            &self.request.window,
            self.starting_balance()?,
            &self.model,
        ))
    }

    pub fn summary(&self) -> Result<ProjectionSummary> {
        let curve = self.balance_curve()?;
        self.summary_for(&curve)
    }

    pub fn alerts(&self) -> Result<Vec<Alert>> {
        let curve = self.balance_curve()?;
        Ok(self.alerts_for(&curve))
    }

    pub fn generate_projection(&self) -> Result<ProjectionReport> {
        let curve = self.balance_curve()?;
        let summary = self.summary_for(&curve)?;
        let alerts = self.alerts_for(&curve);
        Ok(ProjectionReport {
            projections: self.daily_projections()?.to_vec(),
            balance_curve: curve,
            summary,
            alerts,
        })
    }

    /// Events dated exactly `date`; empty when there are none.
    pub fn projections_for_date(&self, date: NaiveDate) -> Result<Vec<ProjectedEvent>> {
        Ok(self
            .daily_projections()?
            .iter()
            .filter(|event| event.date == date)
            .cloned()
            .collect())
    }

    /// Baseline curve with one hypothetical event added.
    pub fn scenario_with_transaction(
        &self,
        amount: Decimal,
        date: NaiveDate,
        kind: EventKind,
        description: &str,
    ) -> Result<Vec<ScenarioPoint>> {
        tracing::debug!(%amount, %date, ?kind, "recomputing curve with hypothetical transaction");
        let added = ProjectedEvent::scenario(date, kind, amount, description);
        let events = scenario::with_transaction(self.daily_projections()?, added);
        self.scenario_points(&events)
    }

    /// Baseline curve with every occurrence of one recurring definition removed.
    pub fn scenario_without_recurring(&self, recurring_id: Uuid) -> Result<Vec<ScenarioPoint>> {
        tracing::debug!(
            recurring = %recurring_id,
            "recomputing curve without recurring definition"
        );
        let events = scenario::without_recurring(self.daily_projections()?, recurring_id);
        self.scenario_points(&events)
    }

    /// Runs `plan` and compares it against the baseline curve.
    pub fn run_scenario(&self, plan: &Scenario) -> Result<ScenarioOutcome> {
        let original = self.balance_curve()?;
        let points = match plan {
            Scenario::AddTransaction {
                amount,
                date,
                kind,
                description,
            } => self.scenario_with_transaction(*amount, *date, *kind, description)?,
            Scenario::RemoveRecurring { recurring_id } => {
                self.scenario_without_recurring(*recurring_id)?
            }
            Scenario::Baseline => original.iter().map(ScenarioPoint::from).collect(),
        };
        let comparison = ScenarioComparison::between(&original, &points);
        Ok(ScenarioOutcome {
            original,
            scenario: points,
            comparison,
        })
    }

    /// The first `limit` projected events of the window together with its alerts.
    pub fn upcoming(&self, limit: usize) -> Result<UpcomingView> {
        let events = self
            .daily_projections()?
            .iter()
            .take(limit)
            .cloned()
            .collect();
        Ok(UpcomingView {
            events,
            alerts: self.alerts()?,
        })
    }

    /// [`upcoming`](Self::upcoming) with the configured limit.
    pub fn upcoming_default(&self) -> Result<UpcomingView> {
        self.upcoming(self.config.upcoming_limit)
    }

    fn scenario_points(&self, events: &[ProjectedEvent]) -> Result<Vec<ScenarioPoint>> {
        Ok(scenario_curve(
            events,
            &self.request.window,
            self.starting_balance()?,
        ))
    }

    fn summary_for(&self, curve: &[BalancePoint]) -> Result<ProjectionSummary> {
        Ok(ProjectionSummary::build(
            self.daily_projections()?,
            curve,
            self.starting_balance()?,
            self.request.window,
        ))
    }

    fn alerts_for(&self, curve: &[BalancePoint]) -> Vec<Alert> {
        let alerts = detect_alerts(curve, self.config.low_balance_threshold, self.today());
        for alert in &alerts {
            tracing::info!(
                family = %self.request.family_id,
                kind = ?alert.kind,
                date = %alert.date,
                severity = ?alert.severity,
                "projected balance alert"
            );
        }
        alerts
    }
}
