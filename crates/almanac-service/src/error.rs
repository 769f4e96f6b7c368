use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid recurrence kind: {0}")]
    InvalidRecurrenceKind(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Start must be strictly in the future")]
    PastStart,

    #[error("Event name already used by this owner: {0}")]
    DuplicateName(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Expansion would exceed the occurrence ceiling of {limit}")]
    UnboundedExpansion { limit: usize },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    StoreError(#[from] almanac_db::error::StoreError),

    #[error(transparent)]
    CoreError(#[from] almanac_core::error::CoreError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
