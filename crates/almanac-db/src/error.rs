use thiserror::Error;

/// Store layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Event name already used by this owner: {name}")]
    DuplicateName { name: String },

    #[error("Event not found: {id}")]
    EventNotFound { id: uuid::Uuid },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    CoreError(#[from] almanac_core::error::CoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
