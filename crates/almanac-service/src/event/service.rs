//! Event service: validates user input, expands the recurrence, and talks to
//! the store.

use chrono::{Days, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::Deserialize;
use uuid::Uuid;

use almanac_core::config::Settings;
use almanac_core::error::CoreError;
use almanac_core::types::RecurrenceKind;
use almanac_db::error::StoreError;
use almanac_db::model::event::{Event, EventWithOccurrences, NewEvent};
use almanac_db::model::occurrence::NewOccurrence;
use almanac_db::store::EventStore;

use crate::calendar::grid::overall_range;
use crate::calendar::localize;
use crate::calendar::recurrence::{ExpansionLimit, expand};
use crate::clock::Clock;
use crate::error::{ServiceError, ServiceResult};

/// Upper bound on event description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Wire-shaped input for creating an event.
///
/// `start_date`/`start_time`/`end_time` define the template occurrence;
/// `end_date` bounds how far the recurrence expands.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub name: String,
    pub description: String,
    pub recurrence: String,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
}

/// Request-scoped event operations for one verified owner identity.
#[derive(Debug)]
pub struct EventService<S, C> {
    store: S,
    clock: C,
    tz: Tz,
    week_start: Weekday,
    limit: ExpansionLimit,
}

impl<S: EventStore, C: Clock> EventService<S, C> {
    #[must_use]
    pub fn new(store: S, clock: C, tz: Tz, week_start: Weekday, limit: ExpansionLimit) -> Self {
        Self {
            store,
            clock,
            tz,
            week_start,
            limit,
        }
    }

    /// ## Summary
    /// Builds a service from loaded settings.
    ///
    /// ## Errors
    /// Returns an error when the configured timezone or week start does not
    /// parse.
    pub fn from_settings(store: S, clock: C, settings: &Settings) -> ServiceResult<Self> {
        Ok(Self::new(
            store,
            clock,
            settings.calendar.timezone()?,
            settings.calendar.week_start()?,
            ExpansionLimit::from(&settings.expansion),
        ))
    }

    /// ## Summary
    /// Validates the request, expands the recurrence, and commits the event
    /// with its full occurrence set atomically. Validation order: recurrence
    /// kind, interval, start-in-future, per-owner name uniqueness.
    ///
    /// ## Errors
    /// `InvalidRecurrenceKind`, `ValidationError` (description bound),
    /// `InvalidInterval`, `PastStart`, `DuplicateName`, or
    /// `UnboundedExpansion`; all detected before anything is written.
    #[tracing::instrument(skip(self, input), fields(owner_id = %owner_id, name = %input.name))]
    pub async fn create_event(&self, owner_id: Uuid, input: &CreateEvent) -> ServiceResult<Event> {
        let kind = RecurrenceKind::parse(&input.recurrence)
            .ok_or_else(|| ServiceError::InvalidRecurrenceKind(input.recurrence.clone()))?;

        if input.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(ServiceError::ValidationError(format!(
                "description exceeds {MAX_DESCRIPTION_CHARS} characters"
            )));
        }

        let template_start = localize(input.start_date.and_time(input.start_time), self.tz)?;
        let template_end = localize(input.start_date.and_time(input.end_time), self.tz)?;
        let outer_end = localize(input.end_date.and_time(input.end_time), self.tz)?;

        if template_start >= outer_end {
            return Err(ServiceError::InvalidInterval(format!(
                "start {template_start} is not before end {outer_end}"
            )));
        }
        if input.start_time >= input.end_time {
            // Would produce occurrences that end before they start.
            return Err(ServiceError::InvalidInterval(format!(
                "start time {} is not before end time {}",
                input.start_time, input.end_time
            )));
        }

        let now = self.clock.now();
        if template_start.with_timezone(&Utc) <= now {
            tracing::debug!(start = %template_start, now = %now, "Rejecting event in the past");
            return Err(ServiceError::PastStart);
        }

        if self
            .store
            .find_by_owner_and_name(owner_id, &input.name)
            .await?
            .is_some()
        {
            tracing::warn!("Rejecting duplicate event name");
            return Err(ServiceError::DuplicateName(input.name.clone()));
        }

        let occurrences: Vec<NewOccurrence> =
            expand(template_start, template_end, Some(kind), input.end_date, self.limit)?
                .into_iter()
                .map(|(start, end)| NewOccurrence {
                    start: start.with_timezone(&Utc),
                    end: end.with_timezone(&Utc),
                })
                .collect();

        let event = self
            .store
            .create_event_with_occurrences(
                NewEvent {
                    owner_id,
                    name: &input.name,
                    description: &input.description,
                    recurrence: kind,
                },
                occurrences,
            )
            .await
            .map_err(|err| match err {
                // A concurrent writer can still win the name race at the
                // store boundary.
                StoreError::DuplicateName { name } => ServiceError::DuplicateName(name),
                other => ServiceError::StoreError(other),
            })?;

        tracing::info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    /// ## Summary
    /// Looks up the owner's event by name.
    ///
    /// ## Errors
    /// Returns `NotFound` when the owner has no event of that name.
    pub async fn event_by_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> ServiceResult<EventWithOccurrences> {
        self.store
            .find_by_owner_and_name(owner_id, name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("event named {name}")))
    }

    /// ## Summary
    /// Looks up the owner's event with an occurrence on the given calendar
    /// date in the configured timezone.
    ///
    /// ## Errors
    /// Returns `NotFound` when no occurrence starts on that date, or an
    /// input error for an impossible date.
    pub async fn event_on_date(
        &self,
        owner_id: Uuid,
        day: u32,
        month: u32,
        year: i32,
    ) -> ServiceResult<EventWithOccurrences> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            CoreError::InvalidInput(format!("invalid date: {year}-{month:02}-{day:02}"))
        })?;

        self.store
            .find_by_owner_and_occurrence_date(owner_id, date, self.tz)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("event on {date}")))
    }

    /// ## Summary
    /// Lists the owner's events visible from the month view for
    /// `(year, month)`: everything overlapping the merged grid windows of
    /// the previous, current, and next month.
    ///
    /// ## Errors
    /// Returns an input error for a month outside `1..=12`.
    #[tracing::instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn month_events(
        &self,
        owner_id: Uuid,
        year: i32,
        month: u32,
    ) -> ServiceResult<Vec<EventWithOccurrences>> {
        let (range_start, range_end) = overall_range(year, month, self.week_start, self.tz)?;

        // The range end is the midnight opening the last grid cell; push the
        // exclusive query bound past that day.
        let exclusive_end = range_end
            .checked_add_days(Days::new(1))
            .ok_or(CoreError::InvariantViolation("query range out of range"))?;

        let events = self
            .store
            .list_overlapping(
                owner_id,
                range_start.with_timezone(&Utc),
                exclusive_end.with_timezone(&Utc),
            )
            .await?;

        tracing::debug!(count = events.len(), "Month view query answered");
        Ok(events)
    }

    /// ## Summary
    /// Lists all of the owner's events, ordered by earliest occurrence.
    ///
    /// ## Errors
    /// Returns an error if the store fails.
    pub async fn list_events(&self, owner_id: Uuid) -> ServiceResult<Vec<EventWithOccurrences>> {
        Ok(self.store.list_by_owner(owner_id).await?)
    }

    /// ## Summary
    /// Deletes the owner's event together with all of its occurrences.
    ///
    /// ## Errors
    /// Returns `NotFound` when the event does not exist for this owner.
    #[tracing::instrument(skip(self), fields(owner_id = %owner_id, event_id = %event_id))]
    pub async fn delete_event(&self, owner_id: Uuid, event_id: Uuid) -> ServiceResult<()> {
        self.store
            .delete_event(owner_id, event_id)
            .await
            .map_err(|err| match err {
                StoreError::EventNotFound { id } => ServiceError::NotFound(format!("event {id}")),
                other => ServiceError::StoreError(other),
            })
    }
}
