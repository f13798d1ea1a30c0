//! Turns pending entries and recurring definitions into projected events.

use chrono::NaiveDate;

use crate::domain::{admits_account, Entry, EntryClassification, RecurringTransaction};

use super::{
    confidence::ConfidenceModel,
    event::{sort_events, EventKind, EventOrigin, ProjectedEvent},
    recurrence::occurrence_dates,
    window::ProjectionRequest,
};

/// Builds the sorted event list for a request from already-fetched records.
pub struct EventMaterializer<'a> {
    request: &'a ProjectionRequest,
    model: &'a ConfidenceModel,
    today: NaiveDate,
}

impl<'a> EventMaterializer<'a> {
    pub fn new(
        request: &'a ProjectionRequest,
        model: &'a ConfidenceModel,
        today: NaiveDate,
    ) -> Self {
        Self {
            request,
            model,
            today,
        }
    }

    pub fn materialize(
        &self,
        entries: &[Entry],
        recurring: &[RecurringTransaction],
    ) -> Vec<ProjectedEvent> {
        let mut events = self.pending_events(entries);
        let pending_count = events.len();
        events.extend(self.recurring_events(recurring));
        tracing::debug!(
            pending = pending_count,
            recurring = events.len() - pending_count,
            "materialized projection events"
        );
        sort_events(&mut events);
        events
    }

    /// One event per pending entry inside the window and account filter.
    pub fn pending_events(&self, entries: &[Entry]) -> Vec<ProjectedEvent> {
        let window = &self.request.window;
        let filter = self.request.account_filter();
        entries
            .iter()
            .filter(|entry| entry.pending)
            .filter(|entry| window.contains(entry.date))
            .filter(|entry| admits_account(filter, entry.account_id))
            .map(|entry| {
                let kind = match entry.classification {
                    EntryClassification::Income => EventKind::Income,
                    EntryClassification::Expense => EventKind::Expense,
                };
                ProjectedEvent::new(
                    entry.date,
                    kind,
                    entry.amount,
                    entry.name.clone(),
                    self.model.pending_confidence(),
                    EventOrigin::Pending,
                    Some(entry.id),
                )
            })
            .collect()
    }

    /// One event per expected occurrence of each active, unpaused definition.
    pub fn recurring_events(&self, recurring: &[RecurringTransaction]) -> Vec<ProjectedEvent> {
        let mut events = Vec::new();
        for definition in recurring.iter().filter(|definition| definition.is_active()) {
            if definition.is_paused(self.today) {
                tracing::debug!(recurring = %definition.id, "skipping paused recurring definition");
                continue;
            }
            events.extend(self.events_for(definition));
        }
        events
    }

    fn events_for(&self, definition: &RecurringTransaction) -> Vec<ProjectedEvent> {
        let amount = definition.projected_amount();
        let kind = EventKind::from_signed(amount);
        occurrence_dates(definition, &self.request.window)
            .into_iter()
            .map(|date| {
                let mut event = ProjectedEvent::new(
                    date,
                    kind,
                    amount,
                    definition.display_name(),
                    self.model.event_confidence(definition, date, self.today),
                    EventOrigin::Recurring,
                    Some(definition.id),
                );
                event.recurring_ref = Some(definition.id);
                event.amount_min = definition.expected_amount_min;
                event.amount_max = definition.expected_amount_max;
                event
            })
            .collect()
    }
}
