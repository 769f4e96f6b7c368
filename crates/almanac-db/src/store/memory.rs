//! In-memory `EventStore` implementation.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::model::event::{Event, EventWithOccurrences, NewEvent};
use crate::model::occurrence::{NewOccurrence, Occurrence};
use crate::store::EventStore;

/// Event store backed by process memory.
///
/// All writes for one call happen under a single write lock, which is what
/// makes `create_event_with_occurrences` atomic and the per-owner name
/// uniqueness check race-free.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    events: HashMap<Uuid, Event>,
    /// Occurrence rows keyed by owning event, kept sorted by start instant.
    occurrences: HashMap<Uuid, Vec<Occurrence>>,
}

impl MemoryEventStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn assemble(&self, event: &Event) -> EventWithOccurrences {
        EventWithOccurrences {
            event: event.clone(),
            occurrences: self
                .occurrences
                .get(&event.id)
                .cloned()
                .unwrap_or_default(),
        }
    }

    fn owner_events(&self, owner_id: Uuid) -> impl Iterator<Item = &Event> {
        self.events
            .values()
            .filter(move |event| event.owner_id == owner_id)
    }
}

impl EventStore for MemoryEventStore {
    #[tracing::instrument(skip(self, event, occurrences), fields(
        owner_id = %event.owner_id,
        name = %event.name,
        occurrence_count = occurrences.len()
    ))]
    async fn create_event_with_occurrences(
        &self,
        event: NewEvent<'_>,
        occurrences: Vec<NewOccurrence>,
    ) -> StoreResult<Event> {
        let mut inner = self.inner.write().await;

        if inner
            .owner_events(event.owner_id)
            .any(|existing| existing.name == event.name)
        {
            tracing::warn!("Rejecting duplicate event name");
            return Err(StoreError::DuplicateName {
                name: event.name.to_string(),
            });
        }

        if let Some(bad) = occurrences.iter().find(|row| row.start >= row.end) {
            return Err(StoreError::Validation(format!(
                "occurrence start {} is not before end {}",
                bad.start, bad.end
            )));
        }

        let record = Event {
            id: Uuid::new_v4(),
            owner_id: event.owner_id,
            name: event.name.to_string(),
            description: event.description.to_string(),
            recurrence: event.recurrence,
        };

        let mut rows: Vec<Occurrence> = occurrences
            .into_iter()
            .map(|row| Occurrence {
                id: Uuid::new_v4(),
                event_id: record.id,
                start: row.start,
                end: row.end,
            })
            .collect();
        rows.sort_by_key(|row| row.start);

        inner.events.insert(record.id, record.clone());
        inner.occurrences.insert(record.id, rows);

        tracing::debug!(event_id = %record.id, "Event created");
        Ok(record)
    }

    async fn find_by_owner_and_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> StoreResult<Option<EventWithOccurrences>> {
        let inner = self.inner.read().await;

        Ok(inner
            .owner_events(owner_id)
            .find(|event| event.name == name)
            .map(|event| inner.assemble(event)))
    }

    async fn find_by_owner_and_occurrence_date(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        tz: Tz,
    ) -> StoreResult<Option<EventWithOccurrences>> {
        let inner = self.inner.read().await;

        // First match by occurrence start, so repeated lookups are stable.
        let hit = inner
            .owner_events(owner_id)
            .filter_map(|event| {
                inner
                    .occurrences
                    .get(&event.id)
                    .and_then(|rows| {
                        rows.iter()
                            .find(|row| row.start.with_timezone(&tz).date_naive() == date)
                    })
                    .map(|row| (event, row.start))
            })
            .min_by_key(|(_, start)| *start);

        Ok(hit.map(|(event, _)| inner.assemble(event)))
    }

    async fn list_overlapping(
        &self,
        owner_id: Uuid,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> StoreResult<Vec<EventWithOccurrences>> {
        let inner = self.inner.read().await;

        let mut selected: Vec<EventWithOccurrences> = inner
            .owner_events(owner_id)
            .filter(|event| {
                inner.occurrences.get(&event.id).is_some_and(|rows| {
                    rows.iter()
                        .any(|row| row.start < range_end && row.end > range_start)
                })
            })
            .map(|event| inner.assemble(event))
            .collect();
        selected.sort_by_key(EventWithOccurrences::first_start);

        Ok(selected)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<EventWithOccurrences>> {
        let inner = self.inner.read().await;

        let mut selected: Vec<EventWithOccurrences> = inner
            .owner_events(owner_id)
            .map(|event| inner.assemble(event))
            .collect();
        selected.sort_by_key(EventWithOccurrences::first_start);

        Ok(selected)
    }

    async fn delete_event(&self, owner_id: Uuid, event_id: Uuid) -> StoreResult<()> {
        let mut inner = self.inner.write().await;

        let owned = inner
            .events
            .get(&event_id)
            .is_some_and(|event| event.owner_id == owner_id);
        if !owned {
            return Err(StoreError::EventNotFound { id: event_id });
        }

        inner.events.remove(&event_id);
        inner.occurrences.remove(&event_id);

        tracing::debug!(event_id = %event_id, "Event deleted");
        Ok(())
    }
}
