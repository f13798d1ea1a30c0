//! Cash flow projection engine: event materialization, monthly recurrence
//! expansion, confidence scoring, balance curves, alerts and scenarios.

pub mod alerts;
pub mod balance;
pub mod confidence;
pub mod curve;
pub mod event;
pub mod materializer;
pub mod recurrence;
pub mod scenario;
pub mod summary;
pub mod window;

pub use alerts::{detect_alerts, Alert, AlertKind, Severity};
pub use balance::starting_balance;
pub use confidence::{confidence_percentage, ConfidenceLevel, ConfidenceModel};
pub use curve::{
    balance_curve, day_statuses, scenario_curve, BalancePoint, DayStatus, ScenarioPoint,
};
pub use event::{EventKind, EventOrigin, ProjectedEvent};
pub use materializer::EventMaterializer;
pub use recurrence::{anchored_date, first_occurrence, next_monthly_date, occurrence_dates};
pub use scenario::{Impact, Scenario, ScenarioComparison, ScenarioOutcome};
pub use summary::ProjectionSummary;
pub use window::{parse_date, DateWindow, ProjectionRequest, ViewMode};
