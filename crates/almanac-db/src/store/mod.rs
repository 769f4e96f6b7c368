//! Abstract event store contract.
//!
//! The engine is written against this trait; the in-memory implementation in
//! [`memory`] backs tests and single-process deployments. A persistent
//! backend would implement the same contract at this seam.

pub mod memory;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::model::event::{Event, EventWithOccurrences, NewEvent};
use crate::model::occurrence::NewOccurrence;

/// Per-owner event persistence.
///
/// Implementations own all concurrency control: a race between two writers
/// on the same `(owner, name)` pair must surface as
/// [`StoreError::DuplicateName`](crate::error::StoreError::DuplicateName),
/// never as partial or corrupted state.
#[expect(
    async_fn_in_trait,
    reason = "consumed through generics; implementors decide auto trait bounds"
)]
pub trait EventStore {
    /// ## Summary
    /// Creates an event together with its full occurrence set, atomically.
    /// Either everything is visible to readers afterwards or nothing is.
    ///
    /// ## Errors
    /// Returns `DuplicateName` when the owner already has an event of this
    /// name, and `Validation` when an occurrence row violates `start < end`.
    async fn create_event_with_occurrences(
        &self,
        event: NewEvent<'_>,
        occurrences: Vec<NewOccurrence>,
    ) -> StoreResult<Event>;

    /// ## Summary
    /// Looks up an owner's event by its exact name.
    ///
    /// ## Errors
    /// Returns an error if the store fails; an absent event is `Ok(None)`.
    async fn find_by_owner_and_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> StoreResult<Option<EventWithOccurrences>>;

    /// ## Summary
    /// Finds the first event of an owner with an occurrence starting on the
    /// given calendar date, interpreted in `tz`.
    ///
    /// ## Errors
    /// Returns an error if the store fails; an absent event is `Ok(None)`.
    async fn find_by_owner_and_occurrence_date(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        tz: Tz,
    ) -> StoreResult<Option<EventWithOccurrences>>;

    /// ## Summary
    /// Lists an owner's events with at least one occurrence overlapping
    /// `[range_start, range_end)`, ordered by earliest occurrence start.
    ///
    /// ## Errors
    /// Returns an error if the store fails.
    async fn list_overlapping(
        &self,
        owner_id: Uuid,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> StoreResult<Vec<EventWithOccurrences>>;

    /// ## Summary
    /// Lists all events of an owner, ordered by earliest occurrence start.
    ///
    /// ## Errors
    /// Returns an error if the store fails.
    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<EventWithOccurrences>>;

    /// ## Summary
    /// Deletes an owner's event and, with it, all of its occurrences.
    ///
    /// ## Errors
    /// Returns `EventNotFound` when the event does not exist or belongs to a
    /// different owner.
    async fn delete_event(&self, owner_id: Uuid, event_id: Uuid) -> StoreResult<()>;
}
