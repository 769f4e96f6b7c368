use serde::{Deserialize, Serialize};

use almanac_core::types::RecurrenceKind;

use crate::model::occurrence::Occurrence;

/// Calendar event template (aggregate root). Occurrences are exclusively
/// owned by their event and go away with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: uuid::Uuid,
    pub owner_id: uuid::Uuid,
    pub name: String,
    pub description: String,
    pub recurrence: RecurrenceKind,
}

/// Insert struct for creating new events
#[derive(Debug, Clone)]
pub struct NewEvent<'a> {
    pub owner_id: uuid::Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub recurrence: RecurrenceKind,
}

/// An event joined with its occurrence rows, ordered by start instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWithOccurrences {
    pub event: Event,
    pub occurrences: Vec<Occurrence>,
}

impl EventWithOccurrences {
    /// Start instant of the earliest occurrence, if any exist.
    #[must_use]
    pub fn first_start(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.occurrences.first().map(|occurrence| occurrence.start)
    }
}
