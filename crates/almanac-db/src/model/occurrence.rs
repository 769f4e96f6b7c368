use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One concrete, dated instance of an event. Instants are absolute
/// (UTC); wall-clock rendering happens in the configured timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub id: uuid::Uuid,
    pub event_id: uuid::Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Insert struct for creating new occurrences
#[derive(Debug, Clone, Copy)]
pub struct NewOccurrence {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
